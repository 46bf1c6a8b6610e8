//! Error types for the CLI application.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
///
/// Everything here is a startup failure: the process exits non-zero before
/// the reaper ever runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unparseable size string
    #[error("Invalid size '{input}': {reason}")]
    InvalidSize {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Unparseable interval string
    #[error("Invalid interval '{input}': {reason}")]
    InvalidInterval {
        /// The rejected input
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// Cache directory missing or outside the permitted location
    #[error("Unsafe cache directory {}: {reason}", path.display())]
    UnsafeDirectory {
        /// The rejected directory
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reaper error
    #[error(transparent)]
    Reaper(#[from] reaper_core::ReaperError),
}
