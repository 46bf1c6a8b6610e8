//! cache-reaper - keeps a cache directory under a size budget.

use clap::Parser;
use reaper_cli::size::format_size;
use reaper_cli::{logging, Cli, Settings};
use reaper_core::{ReapOutcome, ReaperWorker};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> reaper_cli::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    logging::init(settings.log_level, settings.log_format);

    let config = settings.reaper_config();
    config.validate()?;

    let span = info_span!(
        "reaper",
        dir = %settings.dir.display(),
        max_size = %format_size(settings.max_size),
    );
    let mut worker = ReaperWorker::new(config).with_span(span.clone());

    if settings.once {
        info!(parent: &span, dry_run = settings.dry_run, "Running a single reap cycle");

        match worker.run_once().instrument(span.clone()).await? {
            ReapOutcome::BudgetNotMet(report) => {
                warn!(parent: &span, final_size = report.final_size, "Cache is still over budget")
            }
            outcome => info!(
                parent: &span,
                final_size = outcome.report().final_size,
                "Reap cycle finished"
            ),
        }
        info!(parent: &span, "Metrics:\n{}", worker.metrics().summary());
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    info!(
        parent: &span,
        interval_secs = settings.interval.as_secs(),
        dry_run = settings.dry_run,
        "Starting cache reaper"
    );

    worker.run(shutdown).instrument(span.clone()).await?;

    info!(parent: &span, "Cache reaper stopped");
    Ok(())
}

/// Cancel `shutdown` on Ctrl-C, or SIGTERM on unix.
async fn cancel_on_signal(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Shutdown requested");
    shutdown.cancel();
}
