//! Running the actions attached to user menu items.
//!
//! `Command` items start a detached process; `SendText` items type text into
//! the current tab. Built-in items never reach this module, the callbacks
//! turn them into menu actions.

use crate::tab::Tab;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Split a command line like a POSIX shell and start it in the background.
///
/// A watcher thread reaps the child and logs its exit status.
pub fn run_command(line: &str) -> Result<u32> {
    let mut words = shell_words::split(line)
        .with_context(|| format!("Invalid command line: {}", line))?
        .into_iter();
    let program = words
        .next()
        .with_context(|| format!("Empty command line: {:?}", line))?;
    let args: Vec<String> = words.collect();

    log::info!("Executing user command: {} {}", program, args.join(" "));

    let mut child = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to start {}", program))?;
    let pid = child.id();

    std::thread::Builder::new()
        .name("termit-user-command".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if status.success() => {
                log::debug!("User command {} (pid {}) finished", program, pid)
            }
            Ok(status) => log::warn!("User command {} exited with {}", program, status),
            Err(e) => log::error!("Failed to wait for user command {}: {}", program, e),
        })
        .context("Failed to start user command watcher")?;

    Ok(pid)
}

/// Type `text` into the tab's terminal, in the tab's encoding
pub fn send_text(tab: &mut Tab, text: &str) -> Result<()> {
    log::debug!("Sending {} chars to tab {}", text.len(), tab.id);
    tab.terminal
        .write_str(text)
        .with_context(|| format!("Failed to send text to tab {}", tab.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_line_is_rejected() {
        assert!(run_command("   ").is_err());
        assert!(run_command("echo 'unbalanced").is_err());
    }

    #[test]
    fn test_missing_program_reports_name() {
        let err = run_command("/nonexistent/termit-test-binary --flag").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/termit-test-binary"));
    }

    #[test]
    fn test_send_text_without_child_is_ok() {
        let config = termit_config::Config::default();
        let mut tab = Tab::detached(1, &config, &crate::tab::TabSpec::default());
        assert!(send_text(&mut tab, "ls -la\r").is_ok());
    }
}
