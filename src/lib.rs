//! termit: a lightweight tabbed terminal emulator.
//!
//! Window, menu, tab strip and dialog events are handled by
//! [`callbacks::Callbacks`], which delegates the actual work to a
//! [`core_api::TermitCore`]. The application implements that trait on top of
//! PTY-backed tabs in [`app::Termit`].

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod app;
pub mod callbacks;
pub mod cli;
pub mod core_api;
pub mod dialogs;
pub mod input;
pub mod menu;
pub mod selection;
pub mod session;
pub mod tab;
pub mod user_actions;
