//! `Termit`: the tab and session API behind the callbacks.
//!
//! Owns the notebook, the config, the clipboard and the window handle, and
//! implements [`TermitCore`] on top of real PTY-backed tabs.

use crate::core_api::TermitCore;
use crate::input::InputHandler;
use crate::menu::MenuAction;
use crate::session::{capture_session, load_session_from, save_session_to, tab_spec};
use crate::tab::{Notebook, Tab, TabSpec};
use crate::user_actions;
use anyhow::{Context, Result, anyhow, bail};
use std::path::Path;
use std::sync::Arc;
use termit_config::{Config, FontDescription, RgbColor, UserAction};
use termit_keybindings::{KeybindingMatcher, KeybindingRegistry};
use tokio::runtime::Runtime;
use winit::window::Window;

/// Title used when neither the command line nor the config sets one
pub const DEFAULT_WINDOW_TITLE: &str = "Termit";

pub struct Termit {
    notebook: Notebook,
    config: Config,
    keybindings: KeybindingRegistry,
    runtime: Arc<Runtime>,
    /// Set once the window exists; tabs opened before that get their
    /// refresh task when it is attached
    window: Option<Arc<Window>>,
    /// Keyboard modifiers and clipboard
    pub input: InputHandler,
    window_title: String,
    /// Encoding shown in the status bar
    statusbar_encoding: String,
    /// Grid size new tabs start with, following the window size
    grid_size: (u16, u16),
    quit_requested: bool,
}

impl Termit {
    pub fn new(config: Config, runtime: Arc<Runtime>) -> Self {
        let keybindings = KeybindingRegistry::from_config(&config.keybindings);
        let window_title = config
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string());
        let grid_size = (config.columns, config.rows);

        Self {
            notebook: Notebook::new(),
            statusbar_encoding: config.default_encoding.clone(),
            config,
            keybindings,
            runtime,
            window: None,
            input: InputHandler::new(),
            window_title,
            grid_size,
            quit_requested: false,
        }
    }

    /// Attach the window and start redraw polling for existing tabs
    pub fn attach_window(&mut self, window: Arc<Window>) {
        window.set_title(&self.window_title);
        for tab in self.notebook.tabs_mut() {
            tab.start_refresh_task(&self.runtime, Arc::clone(&window));
        }
        self.window = Some(window);
    }

    pub fn keybindings(&self) -> &KeybindingRegistry {
        &self.keybindings
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    pub fn statusbar_encoding(&self) -> &str {
        &self.statusbar_encoding
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Resize every tab to the grid that fits the window
    pub fn resize_grid(&mut self, cols: u16, rows: u16) {
        if (cols, rows) == self.grid_size {
            return;
        }
        self.grid_size = (cols, rows);
        for tab in self.notebook.tabs_mut() {
            if let Err(e) = tab.terminal.resize(cols, rows) {
                log::warn!("Tab {}: {:#}", tab.id, e);
            }
        }
    }

    /// Open a tab from `spec` and make it current. Returns its page.
    pub fn open_tab(&mut self, spec: &TabSpec) -> Result<usize> {
        let id = self.notebook.next_id();
        let mut tab = Tab::new(id, &self.config, spec)?;
        let (cols, rows) = self.grid_size;
        tab.terminal.resize(cols, rows)?;
        if let Some(window) = &self.window {
            tab.start_refresh_task(&self.runtime, Arc::clone(window));
        }

        let page = self.notebook.append(tab);
        self.notebook.set_current_page(page);
        Ok(page)
    }

    /// Send encoded key input to the current tab
    pub fn write_to_current(&mut self, bytes: &[u8]) {
        if let Some(tab) = self.notebook.current_tab_mut()
            && let Err(e) = tab.terminal.write(bytes)
        {
            log::error!("Tab {}: {:#}", tab.id, e);
        }
    }
}

impl TermitCore for Termit {
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
        // New tabs start where the current one is
        let spec = TabSpec {
            working_directory: self
                .notebook
                .current_tab()
                .and_then(Tab::working_directory),
            ..TabSpec::default()
        };
        let page = self.open_tab(&spec)?;
        log::info!("Opened tab at page {}", page);
        Ok(())
    }

    fn close_tab(&mut self, page: usize) {
        let Some(tab) = self.notebook.remove(page) else {
            return;
        };
        log::info!("Closed tab {} at page {}", tab.id, page);
        drop(tab);

        if self.notebook.is_empty() {
            log::info!("Last tab closed, exiting");
            self.quit();
        }
    }

    fn prev_tab(&mut self) {
        self.notebook.prev_page();
    }

    fn next_tab(&mut self) {
        self.notebook.next_page();
    }

    fn set_tab_name(&mut self, page: usize, name: &str) {
        if !self.notebook.set_tab_label(page, name) {
            log::warn!("Cannot rename page {}: no such page", page);
        }
    }

    fn set_encoding(&mut self, encoding: &str) -> Result<()> {
        let page = self
            .notebook
            .current_page()
            .ok_or_else(|| anyhow!("No tab is open"))?;
        if let Some(tab) = self.notebook.tab_mut(page) {
            tab.set_encoding(encoding)?;
        }
        self.set_statusbar_encoding(page);
        Ok(())
    }

    fn copy(&mut self) -> Result<()> {
        let Some(text) = self.notebook.current_tab().and_then(Tab::selected_text) else {
            log::debug!("Nothing selected to copy");
            return Ok(());
        };
        self.input.copy_to_clipboard(&text)
    }

    fn paste(&mut self) -> Result<()> {
        let text = self.input.paste_from_clipboard()?;
        let tab = self
            .notebook
            .current_tab_mut()
            .ok_or_else(|| anyhow!("No tab to paste into"))?;
        tab.terminal.paste(&text)
    }

    fn foreground_color(&self) -> RgbColor {
        self.config.foreground_color
    }

    fn set_foreground_color(&mut self, color: RgbColor) {
        log::info!("Foreground colour set to {}", color);
        self.config.foreground_color = color;
        self.request_redraw();
    }

    fn font(&self) -> String {
        self.config.font.clone()
    }

    fn set_font(&mut self, font: &str) {
        let description = FontDescription::parse(font);
        log::info!("Font set to {}", description);
        self.config.font = description.to_string();
        self.request_redraw();
    }

    fn set_window_title(&mut self, title: &str) {
        self.window_title = title.to_string();
        if let Some(window) = &self.window {
            window.set_title(title);
        }
    }

    fn set_statusbar_encoding(&mut self, page: usize) {
        if let Some(tab) = self.notebook.tab(page) {
            self.statusbar_encoding = tab.encoding.clone();
        }
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }

    fn save_session(&mut self, path: &Path) -> Result<()> {
        let state = capture_session(&self.notebook);
        save_session_to(&state, path)?;
        log::info!("Saved {} tabs to {}", state.tabs.len(), path.display());
        Ok(())
    }

    fn load_session(&mut self, path: &Path) -> Result<()> {
        let state = load_session_from(path)?
            .with_context(|| format!("Session file {} does not exist", path.display()))?;
        if state.tabs.is_empty() {
            bail!("Session file {} has no tabs", path.display());
        }

        let first_page = self.notebook.n_pages();
        let mut opened = 0;
        for saved in &state.tabs {
            match self.open_tab(&tab_spec(saved)) {
                Ok(_) => opened += 1,
                Err(e) => log::error!("Failed to restore tab {:?}: {:#}", saved.title, e),
            }
        }
        if opened == 0 {
            bail!("No tab from {} could be opened", path.display());
        }
        if opened == state.tabs.len() {
            self.notebook
                .set_current_page(first_page + state.current_page);
        }
        log::info!("Loaded {} tabs from {}", opened, path.display());
        Ok(())
    }

    fn process_key(&mut self, key: &KeybindingMatcher) -> Option<MenuAction> {
        let name = self.keybindings.lookup_matcher(key)?;
        let action = MenuAction::from_name(name);
        if action.is_none() {
            log::warn!("Key binding names unknown action {:?}", name);
        }
        action
    }

    fn execute_user_action(&mut self, action: &UserAction) -> Result<()> {
        match action {
            UserAction::Command { command } => user_actions::run_command(command).map(|_| ()),
            UserAction::SendText { text } => {
                let tab = self
                    .notebook
                    .current_tab_mut()
                    .ok_or_else(|| anyhow!("No tab to send text to"))?;
                user_actions::send_text(tab, text)
            }
            UserAction::Builtin { action } => {
                bail!("Built-in action {:?} is dispatched as a menu action", action)
            }
        }
    }
}

impl Termit {
    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
