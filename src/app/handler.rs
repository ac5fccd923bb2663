//! winit event loop integration.

use super::window_state::WindowState;
use crate::cli::RuntimeOptions;
use std::sync::Arc;
use termit_config::Config;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

/// Owns the window once the event loop has resumed
pub struct WindowManager {
    /// Config waiting for the window to be created
    pending_config: Option<Config>,
    runtime: Arc<Runtime>,
    runtime_options: RuntimeOptions,
    window: Option<WindowState>,
    /// Error that stopped startup, reported after the loop exits
    pub(crate) startup_error: Option<anyhow::Error>,
}

impl WindowManager {
    pub fn new(config: Config, runtime: Arc<Runtime>, runtime_options: RuntimeOptions) -> Self {
        Self {
            pending_config: Some(config),
            runtime,
            runtime_options,
            window: None,
            startup_error: None,
        }
    }

    /// Drop the window (killing its children) and stop the loop
    fn exit_if_requested(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.as_ref().is_some_and(WindowState::should_exit) {
            log::info!("Closing window");
            self.window = None;
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for WindowManager {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.pending_config.take() else {
            return;
        };

        match WindowState::new(
            event_loop,
            config,
            Arc::clone(&self.runtime),
            &self.runtime_options,
        ) {
            Ok(window) => {
                log::info!("Window {:?} created", window.window_id());
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {:#}", e);
                crate::debug_error!("WINDOW", "Startup failed: {:#}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        if window.window_id() != window_id {
            return;
        }
        window.handle_window_event(event);
        self.exit_if_requested(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_if_requested(event_loop);
    }
}
