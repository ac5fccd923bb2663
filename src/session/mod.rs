//! Session files: the open tabs written to YAML and appended back later
//!
//! A session records, per tab, its title, custom label, encoding, working
//! directory and the command it runs. Loading a session opens those tabs
//! after the ones already in the window.

pub mod capture;
pub mod restore;
pub mod storage;

pub use capture::capture_session;
pub use restore::tab_spec;
pub use storage::{load_session_from, save_session_to};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level session state: every tab of the window at the time of save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Timestamp when the session was saved (ISO 8601)
    pub saved_at: String,
    /// Index of the page that was current
    #[serde(default)]
    pub current_page: usize,
    /// Tabs in page order
    #[serde(default)]
    pub tabs: Vec<SessionTab>,
}

/// A single tab in a saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTab {
    /// Tab title
    pub title: String,
    /// Label set by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(default = "termit_config::defaults::encoding")]
    pub encoding: String,
    /// Working directory of the child when saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
    /// Command run instead of the shell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}
