//! Capture session state from the notebook

use super::{SessionState, SessionTab};
use crate::tab::{Notebook, Tab};

/// Capture the tabs of `notebook`, asking each child for its directory
pub fn capture_session(notebook: &Notebook) -> SessionState {
    capture_with(notebook, Tab::working_directory)
}

/// Capture the tabs of `notebook` with a custom working directory probe
pub fn capture_with(
    notebook: &Notebook,
    working_directory: impl Fn(&Tab) -> Option<std::path::PathBuf>,
) -> SessionState {
    let tabs = notebook
        .tabs()
        .iter()
        .map(|tab| SessionTab {
            title: tab.title.clone(),
            custom_name: tab.custom_name.clone(),
            encoding: tab.encoding.clone(),
            working_directory: working_directory(tab),
            command: tab.command.clone(),
        })
        .collect();

    SessionState {
        saved_at: chrono::Utc::now().to_rfc3339(),
        current_page: notebook.current_page().unwrap_or(0),
        tabs,
    }
}
