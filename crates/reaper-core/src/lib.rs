//! Reaper Core
//!
//! Keeps a cache directory under a size budget by deleting the least recently
//! accessed files.
//!
//! # Overview
//!
//! A reap cycle:
//! - **Inventory**: walks the cache root and records every regular file with
//!   its size and last-access time
//! - **Budget check**: compares the total against the configured ceiling
//! - **Eviction**: when over the ceiling, deletes files oldest-access first
//!   until the total is at or below the floor (80% of the ceiling)
//!
//! Nothing about the cache is remembered between cycles; each one re-scans
//! the filesystem. Files that cannot be read or deleted are logged and
//! skipped, and the next cycle tries again.
//!
//! ## Budget
//!
//! | Threshold | Value | Role |
//! |-----------|-------|------|
//! | **Ceiling** | configured maximum | exceeding it triggers a reap |
//! | **Floor** | 80% of the ceiling | eviction stops at or below it |
//!
//! # Usage
//!
//! ## One-time Reap
//!
//! ```no_run
//! use reaper_core::{ReapOutcome, Reaper, ReaperConfig};
//!
//! let reaper = Reaper::new(ReaperConfig::new("/tmp/cache", 512 * 1024 * 1024));
//!
//! match reaper.reap() {
//!     ReapOutcome::UnderBudget(_) => println!("nothing to do"),
//!     ReapOutcome::Reaped(report) => println!("freed {} bytes", report.bytes_freed),
//!     ReapOutcome::BudgetNotMet(report) => println!("still at {} bytes", report.final_size),
//! }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use reaper_core::{ReaperConfig, ReaperWorker};
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReaperConfig::new("/tmp/cache", 1 << 30)
//!         .with_interval(Duration::from_secs(300));
//!     let mut worker = ReaperWorker::new(config)
//!         .with_span(tracing::info_span!("reaper", dir = "/tmp/cache"));
//!
//!     worker.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod budget;
mod config;
mod error;
pub mod inventory;
mod metrics;
pub mod planner;
mod reaper;
mod worker;

pub use budget::Budget;
pub use config::ReaperConfig;
pub use error::{ReaperError, Result};
pub use inventory::{CacheEntry, Inventory};
pub use metrics::{CycleReport, ReapMetrics, ReapOutcome};
pub use planner::eviction_order;
pub use reaper::Reaper;
pub use worker::ReaperWorker;
