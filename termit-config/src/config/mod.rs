//! The `Config` struct and its helpers.

mod persistence;

pub use persistence::{data_dir_from, session_data_dir};

use crate::defaults;
use crate::types::{FontDescription, KeyBinding, LogLevel, RgbColor, UserMenu};
use serde::{Deserialize, Serialize};

/// Application configuration, stored as YAML in `~/.config/termit/config.yaml`.
///
/// Every field has a default so a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Shell to launch in new tabs (falls back to `$SHELL`, then `/bin/sh`)
    #[serde(default)]
    pub shell: Option<String>,

    /// Extra arguments passed to the shell
    #[serde(default)]
    pub shell_args: Vec<String>,

    /// Fixed window title; when unset the current tab's title is used
    #[serde(default)]
    pub title: Option<String>,

    /// Label given to new tabs before the shell reports a title
    #[serde(default = "defaults::default_tab_name")]
    pub default_tab_name: String,

    /// Encoding used by new tabs
    #[serde(default = "defaults::encoding")]
    pub default_encoding: String,

    /// Encodings offered in the Encoding menu
    #[serde(default = "defaults::encodings")]
    pub encodings: Vec<String>,

    /// Propagate the current tab's title to the window title
    #[serde(default = "defaults::allow_changing_title")]
    pub allow_changing_title: bool,

    /// Whether new tabs start with a visible scrollbar
    #[serde(default = "defaults::show_scrollbar")]
    pub show_scrollbar: bool,

    #[serde(default = "defaults::scrollback_lines")]
    pub scrollback_lines: usize,

    /// Font description, e.g. "Monospace 10"
    #[serde(default = "defaults::font")]
    pub font: String,

    #[serde(default = "defaults::foreground_color")]
    pub foreground_color: RgbColor,

    #[serde(default = "defaults::background_color")]
    pub background_color: RgbColor,

    /// Initial terminal width in cells
    #[serde(default = "defaults::columns")]
    pub columns: u16,

    /// Initial terminal height in cells
    #[serde(default = "defaults::rows")]
    pub rows: u16,

    #[serde(default = "defaults::keybindings")]
    pub keybindings: Vec<KeyBinding>,

    #[serde(default = "defaults::user_menus")]
    pub user_menus: Vec<UserMenu>,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shell: None,
            shell_args: Vec::new(),
            title: None,
            default_tab_name: defaults::default_tab_name(),
            default_encoding: defaults::encoding(),
            encodings: defaults::encodings(),
            allow_changing_title: defaults::allow_changing_title(),
            show_scrollbar: defaults::show_scrollbar(),
            scrollback_lines: defaults::scrollback_lines(),
            font: defaults::font(),
            foreground_color: defaults::foreground_color(),
            background_color: defaults::background_color(),
            columns: defaults::columns(),
            rows: defaults::rows(),
            keybindings: defaults::keybindings(),
            user_menus: defaults::user_menus(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Parsed form of `font`.
    pub fn font_description(&self) -> FontDescription {
        FontDescription::parse(&self.font)
    }

    /// Resolve the shell program for new tabs.
    pub fn shell_program(&self) -> String {
        self.shell
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| std::env::var("SHELL").ok())
            .unwrap_or_else(|| "/bin/sh".to_string())
    }

    /// Add default keybindings whose action the user has not bound.
    pub fn merge_default_keybindings(&mut self) {
        for default in defaults::keybindings() {
            if !self.keybindings.iter().any(|kb| kb.action == default.action) {
                log::info!(
                    "Adding default keybinding {} -> {}",
                    default.key,
                    default.action
                );
                self.keybindings.push(default);
            }
        }
    }

    /// Repair values that would leave the UI in an unusable state.
    pub fn normalize(&mut self) {
        if self.encodings.is_empty() {
            log::warn!("No encodings configured, using defaults");
            self.encodings = defaults::encodings();
        }
        if !self
            .encodings
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&self.default_encoding))
        {
            log::warn!(
                "Default encoding {} is not in the encodings list, adding it",
                self.default_encoding
            );
            self.encodings.insert(0, self.default_encoding.clone());
        }
        self.columns = self.columns.clamp(10, 1000);
        self.rows = self.rows.clamp(2, 500);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml_ng::from_str("allow_changing_title: false\n").unwrap();
        assert!(!config.allow_changing_title);
        assert_eq!(config.default_tab_name, "Terminal");
        assert_eq!(config.encodings, defaults::encodings());
        assert_eq!(config.keybindings, defaults::keybindings());
    }

    #[test]
    fn test_merge_default_keybindings_keeps_user_keys() {
        let mut config = Config {
            keybindings: vec![KeyBinding::new("Ctrl+Shift+T", "new_tab")],
            ..Config::default()
        };
        config.merge_default_keybindings();

        let new_tab: Vec<_> = config
            .keybindings
            .iter()
            .filter(|kb| kb.action == "new_tab")
            .collect();
        assert_eq!(new_tab.len(), 1);
        assert_eq!(new_tab[0].key, "Ctrl+Shift+T");
        assert!(config.keybindings.iter().any(|kb| kb.action == "close_tab"));
    }

    #[test]
    fn test_normalize_adds_missing_default_encoding() {
        let mut config = Config {
            default_encoding: "KOI8-R".to_string(),
            ..Config::default()
        };
        config.normalize();
        assert_eq!(config.encodings[0], "KOI8-R");
    }

    #[test]
    fn test_shell_program_prefers_config() {
        let config = Config {
            shell: Some("/usr/bin/fish".to_string()),
            ..Config::default()
        };
        assert_eq!(config.shell_program(), "/usr/bin/fish");
    }
}
