//! Shared integration test helpers for termit.
//!
//! - `RecordingCore`: a `TermitCore` over detached tabs that records every
//!   delegate call as a string
//! - `ScriptedFileChooser`: answers file chooser requests from a script
//!
//! Include with `mod common;` at the top of a test file.

#![allow(dead_code)]

use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use termit::core_api::TermitCore;
use termit::dialogs::FileChooser;
use termit::menu::MenuAction;
use termit::tab::{Notebook, Tab, TabSpec};
use termit_config::{Config, RgbColor, UserAction};
use termit_keybindings::{KeybindingMatcher, KeybindingRegistry};

/// `TermitCore` fake: tabs without child processes, calls recorded in order
pub struct RecordingCore {
    pub notebook: Notebook,
    pub config: Config,
    pub keybindings: KeybindingRegistry,
    pub foreground: RgbColor,
    pub font: String,
    pub calls: Vec<String>,
}

impl RecordingCore {
    /// A core with `n` tabs titled "tab0", "tab1", ...; the first is current
    pub fn with_tabs(n: usize) -> Self {
        Self::with_config(Config::default(), n)
    }

    pub fn with_config(config: Config, n: usize) -> Self {
        let mut core = Self {
            notebook: Notebook::new(),
            keybindings: KeybindingRegistry::from_config(&config.keybindings),
            foreground: config.foreground_color,
            font: config.font.clone(),
            config,
            calls: Vec::new(),
        };
        for i in 0..n {
            core.add_tab(&format!("tab{}", i));
        }
        core.notebook.set_current_page(0);
        core
    }

    /// Append a detached tab without recording a call
    pub fn add_tab(&mut self, title: &str) -> usize {
        let id = self.notebook.next_id();
        let spec = TabSpec {
            title: Some(title.to_string()),
            ..TabSpec::default()
        };
        self.notebook.append(Tab::detached(id, &self.config, &spec))
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls.iter().any(|c| c == call)
    }

    /// Calls whose name (text before the parenthesis) is `name`
    pub fn calls_named(&self, name: &str) -> Vec<&String> {
        self.calls
            .iter()
            .filter(|c| c.split('(').next() == Some(name))
            .collect()
    }

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }
}

impl TermitCore for RecordingCore {
    fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    fn notebook_mut(&mut self) -> &mut Notebook {
        &mut self.notebook
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn append_tab(&mut self) -> Result<()> {
        self.record("append_tab".to_string());
        let page = self.add_tab("new");
        self.notebook.set_current_page(page);
        Ok(())
    }

    fn close_tab(&mut self, page: usize) {
        self.record(format!("close_tab({})", page));
        self.notebook.remove(page);
    }

    fn prev_tab(&mut self) {
        self.record("prev_tab".to_string());
        self.notebook.prev_page();
    }

    fn next_tab(&mut self) {
        self.record("next_tab".to_string());
        self.notebook.next_page();
    }

    fn set_tab_name(&mut self, page: usize, name: &str) {
        self.record(format!("set_tab_name({}, {})", page, name));
        self.notebook.set_tab_label(page, name);
    }

    fn set_encoding(&mut self, encoding: &str) -> Result<()> {
        self.record(format!("set_encoding({})", encoding));
        match self.notebook.current_tab_mut() {
            Some(tab) => tab.set_encoding(encoding),
            None => Ok(()),
        }
    }

    fn copy(&mut self) -> Result<()> {
        self.record("copy".to_string());
        Ok(())
    }

    fn paste(&mut self) -> Result<()> {
        self.record("paste".to_string());
        Ok(())
    }

    fn foreground_color(&self) -> RgbColor {
        self.foreground
    }

    fn set_foreground_color(&mut self, color: RgbColor) {
        self.record(format!("set_foreground_color({})", color));
        self.foreground = color;
    }

    fn font(&self) -> String {
        self.font.clone()
    }

    fn set_font(&mut self, font: &str) {
        self.record(format!("set_font({})", font));
        self.font = font.to_string();
    }

    fn set_window_title(&mut self, title: &str) {
        self.record(format!("set_window_title({})", title));
    }

    fn set_statusbar_encoding(&mut self, page: usize) {
        self.record(format!("set_statusbar_encoding({})", page));
    }

    fn quit(&mut self) {
        self.record("quit".to_string());
    }

    fn save_session(&mut self, path: &Path) -> Result<()> {
        self.record(format!("save_session({})", path.display()));
        Ok(())
    }

    fn load_session(&mut self, path: &Path) -> Result<()> {
        self.record(format!("load_session({})", path.display()));
        Ok(())
    }

    fn process_key(&mut self, key: &KeybindingMatcher) -> Option<MenuAction> {
        self.keybindings
            .lookup_matcher(key)
            .and_then(MenuAction::from_name)
    }

    fn execute_user_action(&mut self, action: &UserAction) -> Result<()> {
        self.record(format!("execute_user_action({})", action.describe()));
        Ok(())
    }
}

/// One file chooser request
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserRequest {
    pub title: String,
    pub directory: PathBuf,
    /// Suggested name, for save requests
    pub default_name: Option<String>,
}

/// File chooser that answers with a fixed path (or cancels) and records
/// what it was asked
pub struct ScriptedFileChooser {
    answer: Option<PathBuf>,
    requests: Rc<RefCell<Vec<ChooserRequest>>>,
}

impl ScriptedFileChooser {
    /// Returns the chooser and a handle to its request log
    pub fn new(answer: Option<PathBuf>) -> (Self, Rc<RefCell<Vec<ChooserRequest>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                answer,
                requests: Rc::clone(&requests),
            },
            requests,
        )
    }
}

impl FileChooser for ScriptedFileChooser {
    fn save_file(
        &mut self,
        title: &str,
        directory: &Path,
        default_name: &str,
    ) -> Option<PathBuf> {
        self.requests.borrow_mut().push(ChooserRequest {
            title: title.to_string(),
            directory: directory.to_path_buf(),
            default_name: Some(default_name.to_string()),
        });
        self.answer.clone()
    }

    fn open_file(&mut self, title: &str, directory: &Path) -> Option<PathBuf> {
        self.requests.borrow_mut().push(ChooserRequest {
            title: title.to_string(),
            directory: directory.to_path_buf(),
            default_name: None,
        });
        self.answer.clone()
    }
}
