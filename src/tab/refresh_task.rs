//! Tab refresh polling task.
//!
//! The PTY reader thread only bumps the terminal's generation counter; this
//! task notices the change and asks the window for a redraw.

use crate::tab::Tab;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Poll interval while output is arriving
const ACTIVE_INTERVAL_MS: u64 = 16;
/// Upper bound for the idle backoff
const MAX_IDLE_INTERVAL_MS: u64 = 250;

impl Tab {
    /// Start the refresh polling task for this tab
    pub fn start_refresh_task(&mut self, runtime: &Runtime, window: Arc<winit::window::Window>) {
        self.stop_refresh_task();

        let generation = self.terminal.generation_handle();
        let tab_id = self.id;

        let handle = runtime.spawn(async move {
            let mut last_gen = generation.load(Ordering::Relaxed);
            let mut idle_streak = 0u32;

            loop {
                let interval_ms = if idle_streak == 0 {
                    ACTIVE_INTERVAL_MS
                } else {
                    (ACTIVE_INTERVAL_MS << idle_streak.min(4)).min(MAX_IDLE_INTERVAL_MS)
                };
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;

                let current_gen = generation.load(Ordering::Relaxed);
                if current_gen != last_gen {
                    last_gen = current_gen;
                    idle_streak = 0;
                    window.request_redraw();
                } else {
                    idle_streak = idle_streak.saturating_add(1);
                }
            }
        });

        log::debug!("Started refresh task for tab {}", tab_id);
        self.refresh_task = Some(handle);
    }

    /// Stop the refresh polling task
    pub fn stop_refresh_task(&mut self) {
        if let Some(handle) = self.refresh_task.take() {
            handle.abort();
        }
    }
}
