use crate::di::{Adapters, UseCases};
use picketline_domain::Config;
use picketline_jobs::{JobRunner, LocationWatchJob, SnapshotRefreshJob};
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs the background jobs while location fixes arrive on stdin. Stops at
/// end of input or on Ctrl-C.
pub async fn run(
    config: &Config,
    adapters: &Adapters,
    use_cases: &UseCases,
) -> anyhow::Result<ExitCode> {
    let shutdown = CancellationToken::new();

    let refresh_job = SnapshotRefreshJob::new(
        use_cases.refresh.clone(),
        use_cases.cache.clone(),
        adapters.location.clone(),
    )
    .with_interval(Some(Duration::from_secs(config.refresh.interval_secs)))
    .with_min_interval(Duration::from_secs(config.refresh.min_interval_secs));

    let watch_job = LocationWatchJob::new(
        use_cases.handle_location_update.clone(),
        adapters.location.clone(),
    );

    let handles = JobRunner::new()
        .with_snapshot_refresh(refresh_job)
        .with_location_watch(watch_job)
        .with_shutdown_token(shutdown.clone())
        .start();

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        fed = adapters.location.feed_lines(stdin) => {
            let samples = fed?;
            info!(samples, "Location input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    shutdown.cancel();
    for handle in handles {
        handle.await?;
    }

    info!(
        outstanding_alerts = adapters.notifications.outstanding_count(),
        "Watch stopped"
    );
    Ok(ExitCode::SUCCESS)
}
