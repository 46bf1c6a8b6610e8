//! Error types for reaper operations

use thiserror::Error;

/// Errors that can occur while configuring or running the reaper
///
/// Per-file problems during a cycle (unreadable entries, failed deletes) are
/// never surfaced through this type: they are logged and skipped.
#[derive(Error, Debug)]
pub enum ReaperError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues, panicked reap task)
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type alias for reaper operations.
pub type Result<T> = std::result::Result<T, ReaperError>;
