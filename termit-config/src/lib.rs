//! Configuration system for the termit terminal emulator.
//!
//! This crate provides configuration loading, saving, and default values
//! for the terminal emulator. It includes:
//!
//! - The `Config` struct and its YAML persistence
//! - Key binding and user menu entries
//! - Colour and font description types
//! - XDG data path resolution for saved sessions

pub mod config;
pub mod defaults;
mod error;
mod types;

pub use config::{Config, data_dir_from, session_data_dir};
pub use error::ConfigError;
pub use types::{
    FontDescription, KeyBinding, LogLevel, RgbColor, UserAction, UserMenu, UserMenuItem,
};
