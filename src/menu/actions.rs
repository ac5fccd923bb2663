//! Menu action definitions for termit
//!
//! This module defines the `MenuAction` enum: everything a menu entry, the
//! tab strip context menu, a key binding or a built-in user action can ask
//! the callbacks to do.

use termit_config::UserMenuItem;

/// Actions that can be triggered from menus and key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    // File menu
    /// Create a new tab
    NewTab,
    /// Close the current tab
    CloseTab,
    /// Save open tabs to a session file
    SaveSession,
    /// Append tabs from a session file
    LoadSession,
    /// Quit, asking first when several tabs are open
    Exit,

    // Edit menu
    /// Copy selected text to clipboard
    Copy,
    /// Paste from clipboard
    Paste,
    /// Rename the current tab
    SetTabName,
    SelectFont,
    SelectForegroundColor,

    // Tabs / view
    /// Switch to previous tab
    PreviousTab,
    /// Switch to next tab
    NextTab,
    /// Show or hide the current tab's scrollbar
    ToggleScrollbar,
    /// Switch the current tab to an encoding
    SetEncoding(String),

    /// Entry of a user-defined menu
    UserItem(UserMenuItem),
}

impl MenuAction {
    /// Resolve the action name used in key bindings and built-in user actions
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name.trim().to_ascii_lowercase().as_str() {
            "new_tab" => Self::NewTab,
            "close_tab" => Self::CloseTab,
            "save_session" => Self::SaveSession,
            "load_session" => Self::LoadSession,
            "exit" | "quit" => Self::Exit,
            "copy" => Self::Copy,
            "paste" => Self::Paste,
            "set_tab_name" => Self::SetTabName,
            "select_font" => Self::SelectFont,
            "select_foreground_color" => Self::SelectForegroundColor,
            "prev_tab" | "previous_tab" => Self::PreviousTab,
            "next_tab" => Self::NextTab,
            "toggle_scrollbar" => Self::ToggleScrollbar,
            other => {
                // "encoding:KOI8-R" style names carry their argument
                let (kind, arg) = other.split_once(':')?;
                if kind != "encoding" {
                    return None;
                }
                let original = name.trim();
                let arg = &original[original.len() - arg.len()..];
                return Some(Self::SetEncoding(arg.trim().to_string()));
            }
        };
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_names_resolve() {
        assert_eq!(MenuAction::from_name("new_tab"), Some(MenuAction::NewTab));
        assert_eq!(MenuAction::from_name("Prev_Tab"), Some(MenuAction::PreviousTab));
        assert_eq!(MenuAction::from_name("quit"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::from_name("launch_rockets"), None);
    }

    #[test]
    fn test_encoding_keeps_argument_case() {
        assert_eq!(
            MenuAction::from_name("encoding:ISO-8859-1"),
            Some(MenuAction::SetEncoding("ISO-8859-1".to_string()))
        );
        assert_eq!(MenuAction::from_name("font:Mono"), None);
    }
}
