//! Configuration value types shared across termit crates.

mod color;
mod font;
mod keybinding;
mod terminal;
mod user_menu;

pub use color::RgbColor;
pub use font::FontDescription;
pub use keybinding::KeyBinding;
pub use terminal::LogLevel;
pub use user_menu::{UserAction, UserMenu, UserMenuItem};
