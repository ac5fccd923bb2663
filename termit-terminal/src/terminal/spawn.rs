use super::{PtyProcess, TerminalManager, feed};
use anyhow::{Context, Result};
use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Program, arguments, directory and extra environment for a new child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    fn to_builder(&self) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program);
        cmd.args(&self.args);
        cmd.env("TERM", "xterm-256color");
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        if let Some(dir) = self.working_dir.as_ref().filter(|d| d.is_dir()) {
            cmd.cwd(dir);
        }
        cmd
    }
}

// ========================================================================
// Shell spawn methods
// ========================================================================

impl TerminalManager {
    /// Spawn `command` on a new PTY sized to this terminal
    pub fn spawn(&mut self, command: &ShellCommand) -> Result<()> {
        if self.pty.is_some() {
            anyhow::bail!("Terminal already has a child process");
        }
        log::info!(
            "Spawning {} with args {:?} in {:?}",
            command.program,
            command.args,
            command.working_dir
        );

        let (cols, rows) = self.dimensions;
        let pair = native_pty_system()
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .context("Failed to open PTY")?;

        let child = pair
            .slave
            .spawn_command(command.to_builder())
            .with_context(|| format!("Failed to spawn {}", command.program))?;
        // The child holds its own copy of the slave side
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .context("Failed to clone PTY reader")?;
        let writer = pair
            .master
            .take_writer()
            .context("Failed to take PTY writer")?;

        let reader_thread = self.start_reader(reader)?;

        self.output_closed.store(false, Ordering::Release);
        self.pty = Some(PtyProcess {
            master: pair.master,
            writer,
            child,
            reader: Some(reader_thread),
        });
        log::info!("Child started with pid {:?}", self.pid());
        Ok(())
    }

    fn start_reader(
        &self,
        mut reader: Box<dyn Read + Send>,
    ) -> Result<std::thread::JoinHandle<()>> {
        let parser = Arc::clone(&self.parser);
        let encoding = Arc::clone(&self.encoding);
        let generation = Arc::clone(&self.generation);
        let closed = Arc::clone(&self.output_closed);

        std::thread::Builder::new()
            .name("termit-pty-reader".to_string())
            .spawn(move || {
                let mut buf = [0u8; 8192];
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => feed(&parser, &encoding, &generation, &buf[..n]),
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            log::debug!("PTY read ended: {}", e);
                            break;
                        }
                    }
                }
                closed.store(true, Ordering::Release);
                generation.fetch_add(1, Ordering::Relaxed);
            })
            .context("Failed to start PTY reader thread")
    }
}

// ========================================================================
// PTY I/O methods
// ========================================================================

impl TerminalManager {
    /// Write raw bytes to the PTY (send user input to the child)
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        // Typing snaps the view back to the live screen
        if self.scroll_offset() != 0 {
            self.set_scroll_offset(0);
        }
        let Some(pty) = self.pty.as_mut() else {
            log::debug!("Dropping {} bytes written to terminal without child", data.len());
            return Ok(());
        };
        pty.writer
            .write_all(data)
            .context("Failed to write to PTY")?;
        pty.writer.flush().context("Failed to flush PTY")?;
        Ok(())
    }

    /// Write text, encoded for the child
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        let bytes = self.encoding().encode(text).into_owned();
        self.write(&bytes)
    }

    /// Paste text, honouring bracketed paste mode when the child enabled it
    pub fn paste(&mut self, text: &str) -> Result<()> {
        let normalized = text.replace("\r\n", "\r").replace('\n', "\r");
        let bracketed = self.parser.lock().screen().bracketed_paste();
        if bracketed {
            let mut data = b"\x1b[200~".to_vec();
            data.extend_from_slice(&self.encoding().encode(&normalized));
            data.extend_from_slice(b"\x1b[201~");
            self.write(&data)
        } else {
            self.write_str(&normalized)
        }
    }
}
