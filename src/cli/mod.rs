//! Command-line interface for termit.
//!
//! Parses the flags that override the config file for one run and handles
//! `--print-config`, which exits before any window is created.

use clap::Parser;
use std::path::PathBuf;
use termit_config::{Config, LogLevel};

/// termit - A lightweight tabbed terminal emulator
#[derive(Parser, Debug)]
#[command(name = "termit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/termit/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed window title (disables title propagation from tabs)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Run this command in the first tab instead of the shell
    #[arg(short = 'e', long, value_name = "CMD")]
    pub execute: Option<String>,

    /// Restore tabs from a saved session file
    #[arg(long, value_name = "FILE")]
    pub session: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Window title override
    pub title: Option<String>,
    /// Command line for the first tab
    pub execute: Option<String>,
    /// Session to load at startup
    pub session: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<LogLevel>,
}

impl RuntimeOptions {
    /// Load the config file named by `--config`, or the default one
    pub fn load_config(&self) -> Result<Config, termit_config::ConfigError> {
        match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Apply command line overrides on top of the loaded config.
    ///
    /// A fixed `--title` stops children from renaming the window.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(title) = &self.title {
            log::info!("CLI override: window title {:?}", title);
            config.title = Some(title.clone());
            config.allow_changing_title = false;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            title: cli.title,
            execute: cli.execute.filter(|cmd| !cmd.trim().is_empty()),
            session: cli.session,
            log_level: cli.log_level.map(Into::into),
        }
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Process CLI arguments
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();
    let print_config = cli.print_config;
    let options = RuntimeOptions::from(cli);

    if print_config {
        return CliResult::Exit(match print_effective_config(&options) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("termit: {e:#}");
                1
            }
        });
    }

    CliResult::Continue(options)
}

fn print_effective_config(options: &RuntimeOptions) -> anyhow::Result<()> {
    let mut config = options.load_config()?;
    options.apply_overrides(&mut config);
    print!("{}", serde_yaml_ng::to_string(&config)?);
    Ok(())
}
