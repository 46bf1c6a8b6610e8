//! Reap cycle: inventory, budget check and LRU eviction

use crate::inventory::{CacheEntry, Inventory};
use crate::planner::eviction_order;
use crate::{Budget, CycleReport, ReapOutcome, ReaperConfig};
use std::fs;
use std::io;
use tracing::Span;

/// Performs reap cycles against one cache directory
///
/// A reaper holds no state about cache contents between cycles: every call
/// to [`Reaper::reap`] starts from a fresh scan of the filesystem.
///
/// # Examples
///
/// ```no_run
/// use reaper_core::{Reaper, ReaperConfig};
///
/// let config = ReaperConfig::new("/tmp/cache", 10 * 1024 * 1024);
/// let reaper = Reaper::new(config);
///
/// let outcome = reaper.reap();
/// println!("final size: {}", outcome.report().final_size);
/// ```
#[derive(Debug, Clone)]
pub struct Reaper {
    config: ReaperConfig,
    span: Span,
}

impl Reaper {
    /// Create a new reaper with the given configuration
    ///
    /// Cycle events are recorded under whatever span is current when the
    /// cycle runs; use [`Reaper::with_span`] to attach an explicit one.
    pub fn new(config: ReaperConfig) -> Self {
        Self {
            config,
            span: Span::none(),
        }
    }

    /// Attach the span that carries this reaper's logging context
    ///
    /// Every cycle opens a child span of it, so fields recorded on the
    /// parent (cache directory, instance name, ...) appear on each event.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &ReaperConfig {
        &self.config
    }

    /// Run one reap cycle
    ///
    /// 1. Inventories the cache directory
    /// 2. Returns early if the total is within the ceiling
    /// 3. Otherwise deletes the least recently accessed files until the
    ///    estimated size is at or below the floor
    ///
    /// Problems with individual files are logged and skipped; this never
    /// fails as a whole.
    pub fn reap(&self) -> ReapOutcome {
        let cycle = tracing::info_span!(parent: &self.span, "reap_cycle");
        let _guard = cycle.enter();

        let root = &self.config.cache_dir;
        let budget = self.config.budget();

        tracing::debug!(root = %root.display(), "Scanning cache directory");
        let inventory = Inventory::scan(root);

        let mut report = CycleReport {
            files_scanned: inventory.len(),
            bytes_scanned: inventory.total_size(),
            scan_errors: inventory.errors(),
            final_size: inventory.total_size(),
            ..Default::default()
        };

        tracing::debug!(
            files = report.files_scanned,
            bytes = report.bytes_scanned,
            errors = report.scan_errors,
            "Cache inventory complete"
        );

        if !budget.is_exceeded_by(inventory.total_size()) {
            tracing::debug!(
                size = inventory.total_size(),
                ceiling = budget.ceiling(),
                "Cache within budget, nothing to reap"
            );
            return ReapOutcome::UnderBudget(report);
        }

        tracing::info!(
            size = inventory.total_size(),
            ceiling = budget.ceiling(),
            floor = budget.floor(),
            "Cache over budget, reaping"
        );

        let candidates = eviction_order(inventory);
        if self.evict(candidates, budget, &mut report) {
            tracing::info!(
                deleted = report.files_deleted,
                freed = report.bytes_freed,
                size = report.final_size,
                "Reaped cache down to target"
            );
            ReapOutcome::Reaped(report)
        } else {
            tracing::warn!(
                deleted = report.files_deleted,
                failures = report.delete_failures,
                size = report.final_size,
                floor = budget.floor(),
                "Unable to clear enough space"
            );
            ReapOutcome::BudgetNotMet(report)
        }
    }

    /// Delete candidates in order until the budget's floor is reached
    ///
    /// Starts from `report.final_size` and decrements it by each removed
    /// entry's recorded size; failed removals leave it unchanged. Returns
    /// whether the floor was reached.
    pub fn evict<I>(&self, candidates: I, budget: Budget, report: &mut CycleReport) -> bool
    where
        I: IntoIterator<Item = CacheEntry>,
    {
        let mut current = report.final_size;

        for entry in candidates {
            if budget.is_satisfied_by(current) {
                break;
            }

            match self.remove(&entry) {
                Ok(()) => {
                    current = current.saturating_sub(entry.size);
                    report.files_deleted += 1;
                    report.bytes_freed = report.bytes_freed.saturating_add(entry.size);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %entry.path.display(),
                        error = %e,
                        "Failed to delete cache file"
                    );
                    report.delete_failures += 1;
                }
            }
        }

        report.final_size = current;
        budget.is_satisfied_by(current)
    }

    fn remove(&self, entry: &CacheEntry) -> io::Result<()> {
        if self.config.dry_run {
            tracing::info!(
                path = %entry.path.display(),
                size = entry.size,
                "DRY RUN: Would delete cache file"
            );
            return Ok(());
        }

        tracing::debug!(path = %entry.path.display(), size = entry.size, "Deleting cache file");
        fs::remove_file(&entry.path)
    }
}
