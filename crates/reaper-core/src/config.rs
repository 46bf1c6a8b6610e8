//! Configuration for reaper operations
//!
//! Defines the cache root, the size ceiling and the check interval.

use crate::{Budget, ReaperError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the reaper service
///
/// Sizes are plain byte counts here; parsing human-readable strings such as
/// `1g` is the job of the command-line layer.
///
/// # Examples
///
/// ```
/// use reaper_core::ReaperConfig;
///
/// let config = ReaperConfig::new("/tmp/cache", 1024 * 1024);
/// assert_eq!(config.check_interval_secs, 60);
/// assert_eq!(config.budget().floor(), 838_860);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaperConfig {
    /// Directory whose aggregate size is bounded
    pub cache_dir: PathBuf,

    /// Hard ceiling in bytes; reaching it triggers a reap
    pub max_size_bytes: u64,

    /// How often to check the cache (in seconds)
    /// Default: 60
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// Dry-run mode: log what would be deleted without deleting
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_check_interval() -> u64 {
    60
}

impl ReaperConfig {
    /// Create a configuration with the default interval and dry-run disabled
    pub fn new(cache_dir: impl Into<PathBuf>, max_size_bytes: u64) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            max_size_bytes,
            check_interval_secs: default_check_interval(),
            dry_run: false,
        }
    }

    /// Set the check interval
    ///
    /// Stored in whole seconds; sub-second precision is dropped. Use
    /// [`ReaperConfig::check_interval`] to read it back.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.check_interval_secs = interval.as_secs();
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get check interval as Duration
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    /// Budget derived from the configured maximum
    pub fn budget(&self) -> Budget {
        Budget::new(self.max_size_bytes)
    }

    /// Reject configurations the worker cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.cache_dir.as_os_str().is_empty() {
            return Err(ReaperError::Config("cache directory is empty".to_string()));
        }
        if self.max_size_bytes == 0 {
            return Err(ReaperError::Config(
                "maximum cache size must be greater than zero".to_string(),
            ));
        }
        if self.check_interval_secs == 0 {
            return Err(ReaperError::Config(
                "check interval must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
