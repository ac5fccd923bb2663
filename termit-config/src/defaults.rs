//! Default values for configuration fields.
//!
//! Each function backs a `#[serde(default = "...")]` attribute on `Config`.

use crate::types::{KeyBinding, RgbColor, UserMenu};

pub fn default_tab_name() -> String {
    "Terminal".to_string()
}

pub fn encoding() -> String {
    "UTF-8".to_string()
}

pub fn encodings() -> Vec<String> {
    vec!["UTF-8".to_string(), "ISO-8859-1".to_string()]
}

pub fn allow_changing_title() -> bool {
    true
}

pub fn show_scrollbar() -> bool {
    true
}

pub fn scrollback_lines() -> usize {
    4096
}

pub fn font_family() -> String {
    "Monospace".to_string()
}

pub fn font() -> String {
    "Monospace 10".to_string()
}

pub fn foreground_color() -> RgbColor {
    RgbColor::new(0xd3, 0xd7, 0xcf)
}

pub fn background_color() -> RgbColor {
    RgbColor::new(0x1c, 0x1c, 0x1c)
}

pub fn columns() -> u16 {
    80
}

pub fn rows() -> u16 {
    24
}

pub fn keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("Ctrl+T", "new_tab"),
        KeyBinding::new("Ctrl+W", "close_tab"),
        KeyBinding::new("Alt+Left", "prev_tab"),
        KeyBinding::new("Alt+Right", "next_tab"),
        KeyBinding::new("Ctrl+Insert", "copy"),
        KeyBinding::new("Shift+Insert", "paste"),
        KeyBinding::new("Ctrl+Shift+N", "set_tab_name"),
        KeyBinding::new("Ctrl+Shift+Q", "exit"),
    ]
}

pub fn user_menus() -> Vec<UserMenu> {
    Vec::new()
}
