//! Console viewer for compiler diagnostic batches.

use std::path::PathBuf;

use clap::Parser;

mod platform;

use platform::logging::{LogDestination, LogSettings};

/// Command-line arguments for gsclog
#[derive(Parser, Debug)]
#[command(name = "gsclog")]
#[command(about = "Browse, dedupe and sort compiler diagnostics, then jump to the source")]
#[command(version)]
pub struct Cli {
    /// Message batch to load (.xml or .json)
    batch: Option<PathBuf>,

    /// Show only the first message for each distinct text
    #[arg(long)]
    dedup: bool,

    /// Start importing as soon as the batch is loaded
    #[arg(long)]
    auto_start: bool,

    /// Settings file (editor command and recent batches)
    #[arg(long, default_value = "gsclog_settings.ron", env = "GSCLOG_SETTINGS")]
    settings: PathBuf,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log file, used unless --log is terminal
    #[arg(long, default_value = "gsclog.log", env = "GSCLOG_LOG_FILE")]
    log_file: PathBuf,

    /// Include debug-level log lines
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: self.log,
            file: self.log_file.clone(),
            verbose: self.verbose,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::logging::initialize(&cli.log_settings());
    platform::run_app(cli)
}
