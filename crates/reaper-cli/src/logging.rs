//! Tracing subscriber setup.

use serde::Deserialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets whose level follows the configured log level.
const TARGETS: [&str; 3] = ["reaper_core", "reaper_cli", "cache_reaper"];

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Build the filter from `RUST_LOG`, with `level` applied to our own targets.
pub fn env_filter(level: LevelFilter) -> EnvFilter {
    TARGETS
        .iter()
        .fold(EnvFilter::from_default_env(), |filter, target| {
            match format!("{target}={level}").parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        })
}

/// Install the global subscriber, writing to stderr.
pub fn init(level: LevelFilter, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
