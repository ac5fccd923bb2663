//! Helpers for restoring session state

use super::SessionTab;
use crate::tab::TabSpec;
use std::path::{Path, PathBuf};

/// Validate a working directory path, falling back to $HOME if invalid
pub fn validate_cwd(cwd: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = cwd {
        if dir.is_dir() {
            return Some(dir.to_path_buf());
        }
        log::warn!(
            "Session restore: directory '{}' no longer exists, falling back to home",
            dir.display()
        );
    }
    dirs::home_dir()
}

/// Turn a saved tab back into what is needed to open it
pub fn tab_spec(tab: &SessionTab) -> TabSpec {
    TabSpec {
        title: Some(tab.title.clone()),
        custom_name: tab.custom_name.clone(),
        encoding: Some(tab.encoding.clone()),
        working_directory: validate_cwd(tab.working_directory.as_deref()),
        command: tab.command.clone(),
    }
}
