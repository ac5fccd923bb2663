//! User-defined menus shown next to the built-in ones.

use serde::{Deserialize, Serialize};

/// A named menu holding user items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMenu {
    pub name: String,
    #[serde(default)]
    pub items: Vec<UserMenuItem>,
}

/// One entry of a user menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMenuItem {
    /// Label shown in the menu
    pub name: String,
    /// What happens when the item is selected
    pub action: UserAction,
}

/// Declarative action run when a user menu item is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserAction {
    /// Run a command line in the background (parsed with shell-style quoting)
    Command { command: String },
    /// Type text into the current tab
    SendText { text: String },
    /// Run a built-in action by name (same names as key bindings)
    Builtin { action: String },
}

impl UserAction {
    /// Short human-readable form used in log lines.
    pub fn describe(&self) -> String {
        match self {
            UserAction::Command { command } => format!("command `{}`", command),
            UserAction::SendText { text } => format!("send {} bytes", text.len()),
            UserAction::Builtin { action } => format!("builtin `{}`", action),
        }
    }
}
