//! Application module for termit
//!
//! This module contains the main application logic, including:
//! - `App`: Entry point that loads the config and runs the event loop
//! - `WindowManager`: winit handler owning the window
//! - `WindowState`: the window's renderer, tabs and callbacks
//! - `Termit`: the tab and session API the callbacks delegate to

use crate::cli::RuntimeOptions;
use anyhow::Result;
use std::sync::Arc;
use termit_config::Config;
use tokio::runtime::Runtime;
use winit::event_loop::{ControlFlow, EventLoop};

pub mod handler;
mod palette;
pub mod renderer;
pub mod tab_strip;
pub mod terminal_view;
pub mod termit;
pub mod window_state;

pub use handler::WindowManager;
pub use termit::Termit;

/// Main application entry point
pub struct App {
    config: Config,
    runtime: Arc<Runtime>,
    runtime_options: RuntimeOptions,
}

impl App {
    /// Create a new application
    pub fn new(runtime: Arc<Runtime>, runtime_options: RuntimeOptions) -> Result<Self> {
        let mut config = runtime_options.load_config()?;
        runtime_options.apply_overrides(&mut config);
        crate::debug::apply_config_level(config.log_level);

        Ok(Self {
            config,
            runtime,
            runtime_options,
        })
    }

    /// Run the application
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        // The refresh tasks wake the loop when a tab has new output
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut window_manager =
            WindowManager::new(self.config, self.runtime, self.runtime_options);
        event_loop.run_app(&mut window_manager)?;

        match window_manager.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
