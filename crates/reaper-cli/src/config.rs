//! Configuration management for the CLI.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command-line flags and environment variables.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::logging::LogFormat;
use crate::size::{parse_interval, parse_size};
use reaper_core::ReaperConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

/// Contents of a TOML configuration file.
///
/// ```toml
/// dir = "/tmp/build-cache"
/// max_size = "2g"
/// interval = "5m"
/// dry_run = false
/// log_format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Cache directory
    pub dir: Option<PathBuf>,

    /// Maximum cache size, human-readable
    pub max_size: Option<String>,

    /// Check interval, human-readable
    pub interval: Option<String>,

    /// Dry-run mode
    pub dry_run: Option<bool>,

    /// Allow a directory outside the temporary directory
    pub allow_any_dir: Option<bool>,

    /// Log level
    pub log_level: Option<String>,

    /// Log format
    pub log_format: Option<LogFormat>,
}

impl FileConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: FileConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Canonical cache directory
    pub dir: PathBuf,

    /// Maximum cache size in bytes
    pub max_size: u64,

    /// Time between checks
    pub interval: Duration,

    /// Dry-run mode
    pub dry_run: bool,

    /// Run a single cycle and exit
    pub once: bool,

    /// Log level
    pub log_level: LevelFilter,

    /// Log format
    pub log_format: LogFormat,
}

impl Settings {
    /// Resolve settings from parsed arguments, loading `--config` if given.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Merge arguments over a file configuration and validate the result.
    pub fn merge(cli: &Cli, file: FileConfig) -> Result<Self> {
        let dir = cli
            .dir
            .clone()
            .or(file.dir)
            .ok_or_else(|| CliError::Config("No cache directory given (use --dir)".to_string()))?;

        let max_size = parse_size(
            cli.max_size
                .as_deref()
                .or(file.max_size.as_deref())
                .unwrap_or(DEFAULT_MAX_SIZE),
        )?;
        if max_size == 0 {
            return Err(CliError::InvalidSize {
                input: "0".to_string(),
                reason: "maximum size must be greater than zero".to_string(),
            });
        }

        let interval = parse_interval(
            cli.interval
                .as_deref()
                .or(file.interval.as_deref())
                .unwrap_or(DEFAULT_INTERVAL),
        )?;

        let allow_any_dir = cli.allow_any_dir || file.allow_any_dir.unwrap_or(false);
        let dir = check_cache_dir(&dir, allow_any_dir)?;

        let log_level = if cli.quiet {
            LevelFilter::ERROR
        } else if cli.verbose {
            LevelFilter::DEBUG
        } else {
            let level = cli
                .log_level
                .as_deref()
                .or(file.log_level.as_deref())
                .unwrap_or(DEFAULT_LOG_LEVEL);
            LevelFilter::from_str(level)
                .map_err(|_| CliError::Config(format!("Invalid log level '{}'", level)))?
        };

        Ok(Self {
            dir,
            max_size,
            interval,
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            once: cli.once,
            log_level,
            log_format: cli
                .log_format
                .map(Into::into)
                .or(file.log_format)
                .unwrap_or_default(),
        })
    }

    /// Core configuration for the reaper.
    pub fn reaper_config(&self) -> ReaperConfig {
        ReaperConfig::new(&self.dir, self.max_size)
            .with_interval(self.interval)
            .with_dry_run(self.dry_run)
    }
}

const DEFAULT_MAX_SIZE: &str = "1g";
const DEFAULT_INTERVAL: &str = "1m";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Check that `dir` is an existing directory the reaper may delete from.
///
/// Unless `allow_any_dir` is set, the directory must exist and lie strictly
/// below the system temporary directory. With `allow_any_dir` a missing
/// directory is accepted as given, since the reaper treats a missing root as
/// an empty cache. A path that exists but is not a directory is always
/// refused. Returns the canonical path when the directory exists.
pub fn check_cache_dir(dir: &Path, allow_any_dir: bool) -> Result<PathBuf> {
    let rejected = |reason: String| CliError::UnsafeDirectory {
        path: dir.to_path_buf(),
        reason,
    };

    let metadata = match fs::metadata(dir) {
        Ok(metadata) => metadata,
        Err(e) if allow_any_dir && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(dir.to_path_buf());
        }
        Err(e) => return Err(rejected(format!("cannot access: {}", e))),
    };
    if !metadata.is_dir() {
        return Err(rejected("not a directory".to_string()));
    }

    let canonical = fs::canonicalize(dir)?;
    if allow_any_dir {
        return Ok(canonical);
    }

    let temp = fs::canonicalize(std::env::temp_dir())?;
    if canonical == temp || !canonical.starts_with(&temp) {
        return Err(rejected(format!(
            "must be a subdirectory of {} (use --allow-any-dir to override)",
            temp.display()
        )));
    }

    Ok(canonical)
}
