//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// cache-reaper - keep a cache directory under a size budget by deleting the
/// least recently used files.
#[derive(Debug, Parser)]
#[command(name = "cache-reaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Cache directory to keep under budget
    #[arg(short, long, env = "REAPER_DIR")]
    pub dir: Option<PathBuf>,

    /// Maximum cache size (e.g. 512m, 1g)
    #[arg(short, long, env = "REAPER_MAX_SIZE")]
    pub max_size: Option<String>,

    /// Time between checks (e.g. 30s, 5m, 1h)
    #[arg(short, long, env = "REAPER_INTERVAL")]
    pub interval: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "REAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log what would be deleted without deleting anything
    #[arg(long, env = "REAPER_DRY_RUN")]
    pub dry_run: bool,

    /// Allow a cache directory outside the system temporary directory
    #[arg(long, env = "REAPER_ALLOW_ANY_DIR")]
    pub allow_any_dir: bool,

    /// Run a single reap cycle immediately and exit
    #[arg(long)]
    pub once: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "REAPER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, env = "REAPER_LOG_FORMAT")]
    pub log_format: Option<CliLogFormat>,

    /// Verbose output (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Log format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliLogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

impl From<CliLogFormat> for crate::logging::LogFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Text => crate::logging::LogFormat::Text,
            CliLogFormat::Json => crate::logging::LogFormat::Json,
        }
    }
}
