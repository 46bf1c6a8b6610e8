//! Metrics collection for reaper operations

use std::time::Duration;

/// What a single reap cycle observed and did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Regular files found by the inventory
    pub files_scanned: usize,
    /// Aggregate size found by the inventory
    pub bytes_scanned: u64,
    /// Entries skipped because they could not be read
    pub scan_errors: usize,
    /// Files removed (or selected, in dry-run mode)
    pub files_deleted: usize,
    /// Bytes accounted as freed, using inventory-time sizes
    pub bytes_freed: u64,
    /// Candidates whose removal failed
    pub delete_failures: usize,
    /// Estimated cache size at the end of the cycle
    pub final_size: u64,
}

/// How a reap cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReapOutcome {
    /// The cache was within its ceiling; nothing was deleted
    UnderBudget(CycleReport),
    /// Eviction brought the cache down to the floor
    Reaped(CycleReport),
    /// Every candidate was tried and the cache is still above the floor
    BudgetNotMet(CycleReport),
}

impl ReapOutcome {
    /// The report carried by any outcome
    pub fn report(&self) -> &CycleReport {
        match self {
            ReapOutcome::UnderBudget(report)
            | ReapOutcome::Reaped(report)
            | ReapOutcome::BudgetNotMet(report) => report,
        }
    }
}

/// Metrics accumulated across reap cycles
#[derive(Debug, Clone, Default)]
pub struct ReapMetrics {
    /// Total reap cycles completed
    pub cycle_count: usize,

    /// Cycles that found the cache over its ceiling
    pub reap_count: usize,

    /// Cycles that could not reach the floor
    pub budget_misses: usize,

    /// Files deleted across all cycles
    pub files_deleted: usize,

    /// Bytes freed across all cycles
    pub bytes_freed: u64,

    /// Failed deletions across all cycles
    pub delete_failures: usize,

    /// Unreadable entries skipped across all cycles
    pub scan_errors: usize,

    /// Total time spent inside cycles
    pub total_runtime: Duration,
}

impl ReapMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one cycle's outcome into the totals
    pub fn record(&mut self, outcome: &ReapOutcome, elapsed: Duration) {
        let report = outcome.report();
        self.cycle_count += 1;
        match outcome {
            ReapOutcome::UnderBudget(_) => {}
            ReapOutcome::Reaped(_) => self.reap_count += 1,
            ReapOutcome::BudgetNotMet(_) => {
                self.reap_count += 1;
                self.budget_misses += 1;
            }
        }
        self.files_deleted += report.files_deleted;
        self.bytes_freed = self.bytes_freed.saturating_add(report.bytes_freed);
        self.delete_failures += report.delete_failures;
        self.scan_errors += report.scan_errors;
        self.total_runtime += elapsed;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            "Reaper Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Cycles: {}", self.cycle_count),
            format!("Cycles over budget: {}", self.reap_count),
            format!("Cycles short of target: {}", self.budget_misses),
            format!("Files deleted: {}", self.files_deleted),
            format!("Bytes freed: {}", self.bytes_freed),
            format!("Delete failures: {}", self.delete_failures),
            format!("Scan errors: {}", self.scan_errors),
            format!("Total runtime: {}ms", self.total_runtime.as_millis()),
        ];
        lines.join("\n")
    }
}
