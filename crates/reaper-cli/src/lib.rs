//! cache-reaper CLI library.
//!
//! Argument parsing, layered configuration, directory safety checks and
//! logging setup for the `cache-reaper` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod size;

pub use cli::Cli;
pub use config::{check_cache_dir, FileConfig, Settings};
pub use error::{CliError, Result};
pub use logging::LogFormat;
