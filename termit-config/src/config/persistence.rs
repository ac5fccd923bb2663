//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `save` (YAML file I/O with atomic write)
//! - XDG-style path helpers (`config_path`, `config_dir`, `session_data_dir`)

use super::Config;
use crate::error::ConfigError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "termit";

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Config path: {:?}", path);

        if path.exists() {
            log::info!("Loading existing config from {:?}", path);
            let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

            let mut config: Config = if contents.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            };

            // Merge in any new default keybindings that don't exist in user's config
            config.merge_default_keybindings();
            config.normalize();
            Ok(config)
        } else {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join(APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join(APP_DIR)
            } else {
                PathBuf::from(".")
            }
        }
    }
}

/// Directory where session files are saved and looked up.
///
/// `$XDG_DATA_HOME/termit` when the variable is set, else `~/.local/share/termit`.
pub fn session_data_dir() -> PathBuf {
    data_dir_from(std::env::var_os("XDG_DATA_HOME"), dirs::home_dir())
}

/// Resolve the data directory from explicit inputs.
pub fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match xdg_data_home.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg).join(APP_DIR),
        None => home
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("share")
            .join(APP_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_prefers_xdg_data_home() {
        let dir = data_dir_from(
            Some(OsString::from("/xdg/data")),
            Some(PathBuf::from("/home/u")),
        );
        assert_eq!(dir, PathBuf::from("/xdg/data/termit"));
    }

    #[test]
    fn test_data_dir_falls_back_to_home() {
        let dir = data_dir_from(None, Some(PathBuf::from("/home/u")));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/termit"));

        let empty = data_dir_from(Some(OsString::new()), Some(PathBuf::from("/home/u")));
        assert_eq!(empty, dir);
    }

    #[test]
    fn test_config_path_ends_with_yaml() {
        assert!(Config::config_path().ends_with("termit/config.yaml"));
    }
}
