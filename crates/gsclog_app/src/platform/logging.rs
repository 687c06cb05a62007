//! Logger setup for the console session.
//!
//! Log lines go to a file by default so they do not interleave with the
//! message table; `--log terminal` sends them to stderr instead.

use std::fs::File;
use std::path::PathBuf;

use clap::ValueEnum;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to stderr; mixes with the message table.
    Terminal,
    /// Write to the log file and stderr.
    Both,
}

impl LogDestination {
    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }

    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }
}

/// Logging options gathered from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub file: PathBuf,
    pub verbose: bool,
}

impl LogSettings {
    fn level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Installs the global logger. A log file that cannot be created is reported
/// on stderr and skipped; the session still runs.
pub fn initialize(settings: &LogSettings) {
    let level = settings.level();
    let config = session_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if settings.destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if settings.destination.to_file() {
        match File::create(&settings.file) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("gsclog: not logging to {}: {err}", settings.file.display()),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn session_config() -> Config {
    // Thread names tell import runs apart from the session loop.
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .build()
}
