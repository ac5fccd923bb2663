use parking_lot::Mutex;
/// Debug logging for termit
///
/// Two layers share one file:
/// - The `log` facade (`log::info!` and friends) is routed here by
///   [`init_log_bridge`]; its level comes from `--log-level`, `RUST_LOG` or
///   the config file, in that order.
/// - The category macros (`debug_info!("TAB", ...)`) are controlled by the
///   DEBUG_LEVEL environment variable:
///   - 0 or unset: No debugging
///   - 1: Errors only
///   - 2: Info level (callbacks, tab lifecycle)
///   - 3: Debug level (input, redraw decisions)
///   - 4: Trace level (every frame)
///
/// Output goes to `termit_debug.log` in the system temp directory so it never
/// lands in the terminal itself. Warnings and errors are mirrored to stderr.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use termit_config::LogLevel;

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => match val.trim().parse::<u8>() {
                Ok(1) => DebugLevel::Error,
                Ok(2) => DebugLevel::Info,
                Ok(3) => DebugLevel::Debug,
                Ok(4) => DebugLevel::Trace,
                _ => DebugLevel::Off,
            },
            Err(_) => DebugLevel::Off,
        }
    }
}

/// Path of the shared debug log
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("termit_debug.log")
}

struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let level = DebugLevel::from_env();
        // The file is opened lazily by whichever layer needs it first
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();

        let mut logger = DebugLogger { level, file };
        logger.write_raw(&format!(
            "\n{}\ntermit debug session started at {} (level={:?})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            let level_str = match level {
                DebugLevel::Error => "ERROR",
                DebugLevel::Info => "INFO ",
                DebugLevel::Debug => "DEBUG",
                DebugLevel::Trace => "TRACE",
                DebugLevel::Off => return,
            };
            self.write_raw(&format!(
                "[{}] [{}] [{}] {}\n",
                get_timestamp(),
                level_str,
                category,
                msg
            ));
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level <= get_logger().lock().level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    get_logger().lock().log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

// ============================================================================
// `log` crate bridge
// ============================================================================

struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        get_logger().lock().write_raw(&line);
        if record.level() <= log::Level::Warn {
            eprint!("termit: {}", line);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

fn level_from_rust_log() -> Option<log::LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    // Only a bare level is understood; module filters fall back to info
    value
        .split(',')
        .find(|part| !part.contains('='))
        .and_then(|level| level.trim().parse().ok())
        .or(Some(log::LevelFilter::Info))
}

/// Route the `log` facade into the debug log.
///
/// `cli_level` wins over `RUST_LOG`; without either the level stays at
/// `Warn` until [`apply_config_level`] is called with the config value.
pub fn init_log_bridge(cli_level: Option<LogLevel>) {
    let level = cli_level
        .map(LogLevel::to_level_filter)
        .or_else(level_from_rust_log)
        .unwrap_or(log::LevelFilter::Warn);

    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(level);
    }
    LEVEL_PINNED.get_or_init(|| cli_level.is_some() || std::env::var_os("RUST_LOG").is_some());
}

static LEVEL_PINNED: OnceLock<bool> = OnceLock::new();

/// Apply the level from the config file unless the CLI or `RUST_LOG` set one
pub fn apply_config_level(level: LogLevel) {
    if LEVEL_PINNED.get().copied().unwrap_or(false) {
        return;
    }
    log::set_max_level(level.to_level_filter());
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}
