//! The tab and session API that UI callbacks delegate to.
//!
//! Callbacks in [`crate::callbacks`] decide *when* something happens (after
//! a dialog is accepted, only for the secondary button, ...). Implementors of
//! [`TermitCore`] decide *how*: `app::Termit` drives real PTYs, the
//! clipboard and the window, while tests use a recording fake.
//!
//! Operations that can fail return `anyhow::Result`; callbacks log the error
//! and carry on, so a failed delegate never takes the window down.

use crate::menu::MenuAction;
use crate::tab::Notebook;
use anyhow::Result;
use std::path::Path;
use termit_config::{Config, RgbColor, UserAction};
use termit_keybindings::KeybindingMatcher;

/// Delegate operations invoked by UI callbacks
pub trait TermitCore {
    // ── State ────────────────────────────────────────────────────────────

    fn notebook(&self) -> &Notebook;

    fn notebook_mut(&mut self) -> &mut Notebook;

    fn config(&self) -> &Config;

    // ── Tabs ─────────────────────────────────────────────────────────────

    /// Open a new tab running the shell and make it current
    fn append_tab(&mut self) -> Result<()>;

    /// Close the tab at `page`
    fn close_tab(&mut self, page: usize);

    /// Switch to the previous page, wrapping around
    fn prev_tab(&mut self);

    /// Switch to the next page, wrapping around
    fn next_tab(&mut self);

    /// Relabel `page`
    fn set_tab_name(&mut self, page: usize, name: &str);

    /// Switch the current tab to `encoding`
    fn set_encoding(&mut self, encoding: &str) -> Result<()>;

    // ── Clipboard ────────────────────────────────────────────────────────

    /// Copy the current tab's selection to the clipboard
    fn copy(&mut self) -> Result<()>;

    /// Paste the clipboard into the current tab
    fn paste(&mut self) -> Result<()>;

    // ── Appearance ───────────────────────────────────────────────────────

    fn foreground_color(&self) -> RgbColor;

    fn set_foreground_color(&mut self, color: RgbColor);

    /// Current font description, e.g. "Monospace 10"
    fn font(&self) -> String;

    fn set_font(&mut self, font: &str);

    // ── Window ───────────────────────────────────────────────────────────

    fn set_window_title(&mut self, title: &str);

    /// Show the encoding of the tab at `page` in the status bar
    fn set_statusbar_encoding(&mut self, page: usize);

    /// Leave the main loop
    fn quit(&mut self);

    // ── Sessions ─────────────────────────────────────────────────────────

    /// Write the open tabs to `path`
    fn save_session(&mut self, path: &Path) -> Result<()>;

    /// Append the tabs stored in `path`
    fn load_session(&mut self, path: &Path) -> Result<()>;

    // ── Input and user actions ───────────────────────────────────────────

    /// Resolve a key press against the key bindings.
    ///
    /// Returns the bound action, or `None` when the key should reach the
    /// terminal.
    fn process_key(&mut self, key: &KeybindingMatcher) -> Option<MenuAction>;

    /// Run a command or send text for a user menu item
    fn execute_user_action(&mut self, action: &UserAction) -> Result<()>;
}
