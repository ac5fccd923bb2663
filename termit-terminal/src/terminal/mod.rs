use crate::encoding::TerminalEncoding;
use crate::screen::{ScreenSnapshot, TitleTracker};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use portable_pty::{Child, ExitStatus, MasterPty, PtySize};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;

pub mod spawn;

pub use spawn::ShellCommand;

pub(crate) type SharedParser = Arc<Mutex<vt100::Parser<TitleTracker>>>;

/// A child process attached to the master side of a PTY.
pub(crate) struct PtyProcess {
    pub(crate) master: Box<dyn MasterPty + Send>,
    pub(crate) writer: Box<dyn Write + Send>,
    pub(crate) child: Box<dyn Child + Send + Sync>,
    pub(crate) reader: Option<JoinHandle<()>>,
}

/// Terminal manager that pairs a PTY child with its screen state
pub struct TerminalManager {
    /// Screen state fed by the PTY reader thread
    pub(crate) parser: SharedParser,
    /// The running child, if one has been spawned
    pub(crate) pty: Option<PtyProcess>,
    /// Encoding of the byte stream exchanged with the child
    pub(crate) encoding: Arc<Mutex<TerminalEncoding>>,
    /// Bumped whenever the screen changes
    pub(crate) generation: Arc<AtomicU64>,
    /// Set by the reader thread when the child side of the PTY closes
    pub(crate) output_closed: Arc<AtomicBool>,
    /// Terminal dimensions (cols, rows)
    pub(crate) dimensions: (u16, u16),
}

impl TerminalManager {
    /// Create a terminal with no child process attached
    pub fn new(cols: u16, rows: u16, scrollback_size: usize) -> Self {
        log::info!(
            "Creating terminal with dimensions: {}x{}, scrollback: {}",
            cols,
            rows,
            scrollback_size
        );
        let parser =
            vt100::Parser::new_with_callbacks(rows, cols, scrollback_size, TitleTracker::default());

        Self {
            parser: Arc::new(Mutex::new(parser)),
            pty: None,
            encoding: Arc::new(Mutex::new(TerminalEncoding::default())),
            generation: Arc::new(AtomicU64::new(0)),
            output_closed: Arc::new(AtomicBool::new(false)),
            dimensions: (cols, rows),
        }
    }

    /// Terminal dimensions (cols, rows)
    pub fn dimensions(&self) -> (u16, u16) {
        self.dimensions
    }

    /// Resize the screen and, when a child is attached, the PTY
    pub fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        let (cols, rows) = (cols.max(1), rows.max(1));
        if (cols, rows) == self.dimensions {
            return Ok(());
        }
        log::debug!("Resizing terminal to: {}x{}", cols, rows);

        self.parser.lock().screen_mut().set_size(rows, cols);
        if let Some(pty) = &self.pty {
            pty.master
                .resize(PtySize {
                    rows,
                    cols,
                    pixel_width: 0,
                    pixel_height: 0,
                })
                .context("Failed to resize PTY")?;
        }

        self.dimensions = (cols, rows);
        self.generation.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Feed child output into the screen, decoding it first
    pub fn process_output(&self, bytes: &[u8]) {
        feed(&self.parser, &self.encoding, &self.generation, bytes);
    }

    /// Counter that changes whenever the screen needs redrawing, shared with
    /// the task that watches it
    pub fn generation_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.generation)
    }

    /// Last title set by the child through an OSC title sequence
    pub fn window_title(&self) -> Option<String> {
        self.parser.lock().callbacks().title().map(str::to_string)
    }

    /// Returns true once after each title change
    pub fn take_title_change(&self) -> bool {
        self.parser.lock().callbacks_mut().take_title_changed()
    }

    pub fn encoding(&self) -> TerminalEncoding {
        *self.encoding.lock()
    }

    /// Switch the encoding used for subsequent input and output
    pub fn set_encoding(&self, encoding: TerminalEncoding) {
        log::info!("Switching terminal encoding to {}", encoding);
        *self.encoding.lock() = encoding;
    }

    /// Copy of the visible screen for drawing
    pub fn snapshot(&self) -> ScreenSnapshot {
        ScreenSnapshot::capture(self.parser.lock().screen())
    }

    /// Whether the child switched the cursor keys to application mode
    pub fn application_cursor(&self) -> bool {
        self.parser.lock().screen().application_cursor()
    }

    /// Text between two visible cells, inclusive of the start and end cells.
    ///
    /// Positions are (row, col) and may be given in either order.
    pub fn text_between(&self, a: (u16, u16), b: (u16, u16)) -> String {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        self.parser.lock().screen().contents_between(
            start.0,
            start.1,
            end.0,
            end.1.saturating_add(1),
        )
    }

    /// Rows scrolled back from the live screen
    pub fn scroll_offset(&self) -> usize {
        self.parser.lock().screen().scrollback()
    }

    /// Scroll the view; the offset is clamped to the available history
    pub fn set_scroll_offset(&self, rows: usize) -> usize {
        let mut parser = self.parser.lock();
        parser.screen_mut().set_scrollback(rows);
        self.generation.fetch_add(1, Ordering::Relaxed);
        parser.screen().scrollback()
    }

    /// Number of history rows currently available above the screen
    pub fn scrollback_len(&self) -> usize {
        let mut parser = self.parser.lock();
        let current = parser.screen().scrollback();
        parser.screen_mut().set_scrollback(usize::MAX);
        let len = parser.screen().scrollback();
        parser.screen_mut().set_scrollback(current);
        len
    }

    /// Process id of the child
    pub fn pid(&self) -> Option<u32> {
        self.pty.as_ref().and_then(|pty| pty.child.process_id())
    }

    /// True once the child side of the PTY has closed
    pub fn output_closed(&self) -> bool {
        self.output_closed.load(Ordering::Acquire)
    }

    /// Reap the child without blocking.
    ///
    /// `Ok(None)` means it is still running or no child was spawned.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        let Some(pty) = self.pty.as_mut() else {
            return Ok(None);
        };
        let status = pty
            .child
            .try_wait()
            .context("Failed to query child process status")?;
        if status.is_some()
            && let Some(reader) = pty.reader.take_if(|r| r.is_finished())
        {
            let _ = reader.join();
        }
        Ok(status)
    }

    /// Current working directory of the child, when the platform exposes it
    pub fn working_directory(&self) -> Option<PathBuf> {
        use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

        let pid = Pid::from_u32(self.pid()?);
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cwd(UpdateKind::Always),
        );
        system
            .process(pid)
            .and_then(|p| p.cwd())
            .map(|p| p.to_path_buf())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        if let Some(pty) = self.pty.as_mut()
            && matches!(pty.child.try_wait(), Ok(None))
        {
            log::debug!("Killing child {:?} on terminal drop", pty.child.process_id());
            let _ = pty.child.kill();
        }
    }
}

/// Decode `bytes` with the current encoding and advance the screen.
pub(crate) fn feed(
    parser: &SharedParser,
    encoding: &Mutex<TerminalEncoding>,
    generation: &AtomicU64,
    bytes: &[u8],
) {
    let encoding = *encoding.lock();
    let decoded = encoding.decode(bytes);
    parser.lock().process(&decoded);
    generation.fetch_add(1, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_change_is_reported_once() {
        let terminal = TerminalManager::new(80, 24, 100);
        assert_eq!(terminal.window_title(), None);

        terminal.process_output(b"\x1b]2;vim notes.txt\x07");
        assert_eq!(terminal.window_title().as_deref(), Some("vim notes.txt"));
        assert!(terminal.take_title_change());
        assert!(!terminal.take_title_change());

        // Same title again is not a change
        terminal.process_output(b"\x1b]2;vim notes.txt\x07");
        assert!(!terminal.take_title_change());
    }

    #[test]
    fn test_generation_advances_on_output() {
        let terminal = TerminalManager::new(80, 24, 100);
        let generation = terminal.generation_handle();
        let before = generation.load(Ordering::Relaxed);
        terminal.process_output(b"hello");
        assert!(generation.load(Ordering::Relaxed) > before);
        assert_eq!(terminal.snapshot().row_text(0), "hello");
    }

    #[test]
    fn test_latin1_output_is_decoded() {
        let terminal = TerminalManager::new(20, 4, 0);
        terminal.set_encoding(TerminalEncoding::Latin1);
        terminal.process_output(b"na\xefve");
        assert_eq!(terminal.snapshot().row_text(0), "naïve");
    }

    #[test]
    fn test_text_between_any_order() {
        let terminal = TerminalManager::new(20, 4, 0);
        terminal.process_output(b"first line\r\nsecond");
        assert_eq!(terminal.text_between((0, 6), (0, 9)), "line");
        assert_eq!(terminal.text_between((1, 5), (0, 6)), "line\nsecond");
    }

    #[test]
    fn test_scroll_offset_is_clamped_to_history() {
        let terminal = TerminalManager::new(10, 2, 50);
        for i in 0..6 {
            terminal.process_output(format!("line{}\r\n", i).as_bytes());
        }
        let history = terminal.scrollback_len();
        assert!(history > 0);
        assert_eq!(terminal.set_scroll_offset(1000), history);
        assert_eq!(terminal.scroll_offset(), history);
        assert_eq!(terminal.set_scroll_offset(0), 0);
    }

    #[test]
    fn test_no_child_means_no_pid_and_no_status() {
        let mut terminal = TerminalManager::new(80, 24, 0);
        assert_eq!(terminal.pid(), None);
        assert!(terminal.try_wait().unwrap().is_none());
    }

    #[test]
    fn test_resize_updates_dimensions() {
        let mut terminal = TerminalManager::new(80, 24, 0);
        terminal.resize(100, 30).unwrap();
        assert_eq!(terminal.dimensions(), (100, 30));
        assert_eq!(terminal.snapshot().rows.len(), 30);
    }
}
