//! Terminal manager for the termit terminal emulator.
//!
//! This crate provides the `TerminalManager` which pairs a child process
//! running on a PTY with the screen state it draws into:
//!
//! - PTY I/O (write/paste, background reader thread)
//! - Child lifecycle (spawn, resize, non-blocking wait, kill)
//! - Window title tracking from OSC title sequences
//! - Per-tab character encoding
//! - Screen snapshots, selections and scrollback offset for drawing

pub mod encoding;
pub mod screen;
pub mod terminal;

pub use encoding::TerminalEncoding;
pub use portable_pty::ExitStatus;
pub use screen::{CellColor, ScreenCell, ScreenSnapshot};
pub use terminal::{ShellCommand, TerminalManager};
