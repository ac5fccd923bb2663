//! Tab management for the notebook
//!
//! This module provides:
//! - `Tab`: one terminal session (child process plus screen state) and its view state
//! - `Notebook`: the ordered, page-indexed collection of tabs in the window
//! - `TabId`: identifier that stays with a tab when pages shift

mod manager;
mod refresh_task;

pub use manager::Notebook;

use crate::selection::Selection;
use anyhow::{Context, Result};
use std::path::PathBuf;
use termit_config::Config;
use termit_terminal::{ShellCommand, TerminalEncoding, TerminalManager};
use tokio::task::JoinHandle;

/// Unique identifier for each tab
pub type TabId = u64;

/// Everything needed to open a tab besides the config defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabSpec {
    /// Initial title (the config's default tab name when unset)
    pub title: Option<String>,
    /// User-chosen label
    pub custom_name: Option<String>,
    /// Encoding label (the config's default encoding when unset)
    pub encoding: Option<String>,
    pub working_directory: Option<PathBuf>,
    /// Command line to run instead of the configured shell
    pub command: Option<String>,
}

/// A single terminal tab
pub struct Tab {
    /// Unique identifier for this tab
    pub id: TabId,
    /// Title last reported by the terminal, or the default tab name
    pub title: String,
    /// Label set through the tab name dialog; shown instead of `title`
    pub custom_name: Option<String>,
    pub scrollbar_is_shown: bool,
    /// Canonical label of the encoding in use
    pub encoding: String,
    /// Process id of the child, once spawned
    pub pid: Option<u32>,
    /// PTY child and screen state
    pub terminal: TerminalManager,
    /// Mouse selection in the visible grid
    pub selection: Option<Selection>,
    /// Command line the tab was started with, when it is not the shell
    pub command: Option<String>,
    /// Async task for redraw polling
    pub(crate) refresh_task: Option<JoinHandle<()>>,
}

impl Tab {
    /// Open a tab and start its child process
    pub fn new(id: TabId, config: &Config, spec: &TabSpec) -> Result<Self> {
        let mut tab = Self::detached(id, config, spec);
        let command = shell_command(config, spec)?;
        tab.terminal
            .spawn(&command)
            .with_context(|| format!("Failed to start {} in tab {}", command.program, id))?;
        tab.pid = tab.terminal.pid();
        log::info!("Created tab {} running {} (pid {:?})", id, command.program, tab.pid);
        Ok(tab)
    }

    /// A tab whose terminal has no child process attached
    pub fn detached(id: TabId, config: &Config, spec: &TabSpec) -> Self {
        let terminal = TerminalManager::new(config.columns, config.rows, config.scrollback_lines);
        let mut tab = Self {
            id,
            title: spec
                .title
                .clone()
                .unwrap_or_else(|| config.default_tab_name.clone()),
            custom_name: spec.custom_name.clone(),
            scrollbar_is_shown: config.show_scrollbar,
            encoding: TerminalEncoding::default().label().to_string(),
            pid: None,
            terminal,
            selection: None,
            command: spec.command.clone(),
            refresh_task: None,
        };
        let encoding = spec.encoding.as_deref().unwrap_or(&config.default_encoding);
        if let Err(e) = tab.set_encoding(encoding) {
            log::warn!("Tab {}: {:#}", id, e);
        }
        tab
    }

    /// Text shown on the tab strip
    pub fn label(&self) -> &str {
        self.custom_name.as_deref().unwrap_or(&self.title)
    }

    /// Switch the encoding of this tab's terminal
    pub fn set_encoding(&mut self, label: &str) -> Result<()> {
        let encoding = TerminalEncoding::from_label(label)
            .with_context(|| format!("Unsupported encoding {}", label))?;
        self.terminal.set_encoding(encoding);
        self.encoding = encoding.label().to_string();
        Ok(())
    }

    /// Current working directory of the child, when it can be determined
    pub fn working_directory(&self) -> Option<PathBuf> {
        self.terminal.working_directory()
    }

    /// Selected text, if a selection covering more than one cell exists
    pub fn selected_text(&self) -> Option<String> {
        let selection = self.selection.filter(|s| !s.is_single_cell())?;
        let text = self.terminal.text_between(selection.anchor, selection.head);
        (!text.is_empty()).then_some(text)
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        log::info!("Dropping tab {}", self.id);
        self.stop_refresh_task();
    }
}

/// Resolve what a new tab runs: the given command line, or the shell
fn shell_command(config: &Config, spec: &TabSpec) -> Result<ShellCommand> {
    let command = match spec.command.as_deref() {
        Some(line) => {
            let mut words = shell_words::split(line)
                .with_context(|| format!("Invalid command line: {}", line))?
                .into_iter();
            let program = words
                .next()
                .with_context(|| format!("Empty command line: {:?}", line))?;
            ShellCommand::new(program).args(words)
        }
        None => ShellCommand::new(config.shell_program()).args(config.shell_args.iter().cloned()),
    };
    Ok(command
        .working_dir(spec.working_directory.clone())
        .env("COLORTERM", "truecolor"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_custom_name() {
        let config = Config::default();
        let mut tab = Tab::detached(1, &config, &TabSpec::default());
        assert_eq!(tab.label(), "Terminal");
        tab.custom_name = Some("logs".to_string());
        assert_eq!(tab.label(), "logs");
        assert_eq!(tab.title, "Terminal");
    }

    #[test]
    fn test_detached_tab_uses_config_defaults() {
        let config = Config {
            show_scrollbar: false,
            default_encoding: "iso-8859-1".to_string(),
            ..Config::default()
        };
        let tab = Tab::detached(7, &config, &TabSpec::default());
        assert!(!tab.scrollbar_is_shown);
        assert_eq!(tab.encoding, "ISO-8859-1");
        assert_eq!(tab.terminal.encoding(), TerminalEncoding::Latin1);
        assert_eq!(tab.pid, None);
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let mut tab = Tab::detached(1, &Config::default(), &TabSpec::default());
        assert!(tab.set_encoding("KOI8-R").is_err());
        assert_eq!(tab.encoding, "UTF-8");
    }

    #[test]
    fn test_command_line_is_split_like_a_shell() {
        let spec = TabSpec {
            command: Some("tail -f '/var/log/my app.log'".to_string()),
            ..TabSpec::default()
        };
        let command = shell_command(&Config::default(), &spec).unwrap();
        assert_eq!(command.program, "tail");
        assert_eq!(command.args, vec!["-f", "/var/log/my app.log"]);
    }

    #[test]
    fn test_shell_is_used_without_command() {
        let config = Config {
            shell: Some("/bin/zsh".to_string()),
            shell_args: vec!["-l".to_string()],
            ..Config::default()
        };
        let command = shell_command(&config, &TabSpec::default()).unwrap();
        assert_eq!(command.program, "/bin/zsh");
        assert_eq!(command.args, vec!["-l"]);
    }

    #[test]
    fn test_unbalanced_quotes_fail() {
        let spec = TabSpec {
            command: Some("echo 'oops".to_string()),
            ..TabSpec::default()
        };
        assert!(shell_command(&Config::default(), &spec).is_err());
    }

    #[test]
    fn test_selected_text_ignores_single_cell() {
        let mut tab = Tab::detached(1, &Config::default(), &TabSpec::default());
        tab.terminal.process_output(b"hello world");
        tab.selection = Some(Selection::new((0, 3)));
        assert_eq!(tab.selected_text(), None);

        let mut selection = Selection::new((0, 6));
        selection.extend((0, 10));
        tab.selection = Some(selection);
        assert_eq!(tab.selected_text().as_deref(), Some("world"));
    }
}
