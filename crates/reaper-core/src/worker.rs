//! Background worker for continuous reaper operation

use crate::{ReapMetrics, ReapOutcome, Reaper, ReaperConfig, ReaperError, Result};
use std::time::Instant;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::Span;

/// Background worker that runs reap cycles on a schedule
///
/// The worker waits one full interval, runs a cycle to completion, then waits
/// again. The timer is only rearmed once a cycle has returned, so cycles of
/// one worker never overlap and a slow cycle pushes the next one back.
///
/// Cancelling the token interrupts the wait between cycles. A cycle that has
/// already started always runs to completion first.
///
/// # Examples
///
/// ```no_run
/// use reaper_core::{ReaperConfig, ReaperWorker};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ReaperConfig::new("/tmp/cache", 1 << 30);
///     let mut worker = ReaperWorker::new(config);
///
///     let shutdown = CancellationToken::new();
///     let trigger = shutdown.clone();
///     tokio::spawn(async move {
///         tokio::signal::ctrl_c().await.ok();
///         trigger.cancel();
///     });
///
///     // Run until Ctrl+C
///     worker.run(shutdown).await?;
///     Ok(())
/// }
/// ```
pub struct ReaperWorker {
    reaper: Reaper,
    interval: Duration,
    metrics: ReapMetrics,
}

impl ReaperWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: ReaperConfig) -> Self {
        Self::from_reaper(Reaper::new(config))
    }

    /// Create a worker around an existing reaper
    pub fn from_reaper(reaper: Reaper) -> Self {
        let interval = reaper.config().check_interval();
        Self {
            reaper,
            interval,
            metrics: ReapMetrics::new(),
        }
    }

    /// Attach the span that carries the logging context for every cycle
    pub fn with_span(mut self, span: Span) -> Self {
        self.reaper = self.reaper.with_span(span);
        self
    }

    /// Run the worker until `shutdown` is cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Failures inside a
    /// cycle are logged and the schedule continues.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<()> {
        self.reaper.config().validate()?;

        tracing::info!(
            dir = %self.reaper.config().cache_dir.display(),
            "Reaper worker started (interval: {:?})",
            self.interval
        );

        while self.wait(&shutdown).await {
            tracing::debug!("Starting reap cycle");

            if let Err(e) = self.cycle().await {
                tracing::error!("Reap cycle failed: {}", e);
            }
        }

        tracing::info!("Reaper stopped. Final metrics:\n{}", self.metrics.summary());

        Ok(())
    }

    /// Run for a specific number of cycles (useful for testing)
    ///
    /// Each cycle is preceded by a full interval, as in [`ReaperWorker::run`].
    /// Returns the number of cycles completed, which is less than `cycles`
    /// if `shutdown` was cancelled first.
    pub async fn run_cycles(
        &mut self,
        cycles: usize,
        shutdown: CancellationToken,
    ) -> Result<usize> {
        self.reaper.config().validate()?;

        tracing::info!(
            "Reaper worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            if !self.wait(&shutdown).await {
                return Ok(cycle);
            }

            tracing::debug!("Starting reap cycle {}/{}", cycle + 1, cycles);

            if let Err(e) = self.cycle().await {
                tracing::error!("Reap cycle {}/{} failed: {}", cycle + 1, cycles, e);
                return Err(e);
            }
        }

        tracing::info!(
            "Reaper finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );

        Ok(cycles)
    }

    /// Run a single cycle immediately, without waiting for the interval
    pub async fn run_once(&mut self) -> Result<ReapOutcome> {
        self.reaper.config().validate()?;
        self.cycle().await
    }

    /// Get a reference to the accumulated metrics
    pub fn metrics(&self) -> &ReapMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Wait one interval; `false` if cancelled first
    async fn wait(&self, shutdown: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                tracing::info!("Shutdown signal received, stopping reaper");
                false
            }
            _ = sleep(self.interval) => true,
        }
    }

    async fn cycle(&mut self) -> Result<ReapOutcome> {
        let reaper = self.reaper.clone();
        let start = Instant::now();

        // Filesystem walks and deletes block; keep them off the async workers.
        let outcome = tokio::task::spawn_blocking(move || reaper.reap())
            .await
            .map_err(|e| ReaperError::Worker(e.to_string()))?;

        self.metrics.record(&outcome, start.elapsed());
        Ok(outcome)
    }
}
