//! File I/O for session files
//!
//! Sessions are YAML files, by default kept in the session data directory
//! (`$XDG_DATA_HOME/termit` or `~/.local/share/termit`).

use super::SessionState;
use anyhow::{Context, Result};
use std::path::Path;

/// Save session state to a specific file
pub fn save_session_to(state: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create session directory {:?}", parent))?;
    }

    let contents =
        serde_yaml_ng::to_string(state).context("Failed to serialize session state")?;

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write session to {:?}", path))?;

    log::info!("Saved session ({} tabs) to {:?}", state.tabs.len(), path);
    Ok(())
}

/// Load session state from a specific file
///
/// Returns `None` if the file doesn't exist or is empty.
/// Returns an error if the file exists but is corrupt.
pub fn load_session_from(path: &Path) -> Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {:?}", path))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let state: SessionState = serde_yaml_ng::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {:?}", path))?;

    log::info!("Loaded session ({} tabs) from {:?}", state.tabs.len(), path);
    Ok(Some(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionTab;
    use tempfile::tempdir;

    fn sample_session() -> SessionState {
        SessionState {
            saved_at: "2025-01-01T00:00:00Z".to_string(),
            current_page: 1,
            tabs: vec![
                SessionTab {
                    title: "bash".to_string(),
                    custom_name: None,
                    encoding: "UTF-8".to_string(),
                    working_directory: Some("/home/user/work".into()),
                    command: None,
                },
                SessionTab {
                    title: "top".to_string(),
                    custom_name: Some("monitor".to_string()),
                    encoding: "ISO-8859-1".to_string(),
                    working_directory: None,
                    command: Some("top -d 5".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let result = load_session_from(&temp.path().join("nonexistent.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.yaml");
        std::fs::write(&path, "  \n").unwrap();
        assert!(load_session_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.yaml");
        std::fs::write(&path, "tabs: [unterminated").unwrap();
        let err = load_session_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse session"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("dir").join("New session");
        save_session_to(&sample_session(), &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_session_from(&path).unwrap(), Some(sample_session()));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.yaml");
        save_session_to(&sample_session(), &path).unwrap();
        let yaml = std::fs::read_to_string(&path).unwrap();
        assert_eq!(yaml.matches("custom_name").count(), 1);
        assert_eq!(yaml.matches("command").count(), 1);
    }

    #[test]
    fn test_minimal_hand_written_session() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("hand.yaml");
        let yaml = "saved_at: now\ntabs:\n  - title: mail\n    command: mutt\n";
        std::fs::write(&path, yaml).unwrap();
        let state = load_session_from(&path).unwrap().unwrap();
        assert_eq!(state.current_page, 0);
        assert_eq!(state.tabs[0].encoding, "UTF-8");
        assert_eq!(state.tabs[0].command.as_deref(), Some("mutt"));
    }
}
