use picketline_application::ports::LocationSourcePort;
use picketline_application::services::SnapshotCache;
use picketline_application::use_cases::{RefreshOutcome, RefreshSnapshotUseCase};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const FALLBACK_INTERVAL: Duration = Duration::from_secs(3600);
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically asks the provider whether the snapshot changed, using the
/// most recent location fix.
///
/// Without a fixed interval the job follows the snapshot's suggested refresh
/// interval, re-read before every wait, never going below the minimum.
pub struct SnapshotRefreshJob {
    refresh: Arc<RefreshSnapshotUseCase>,
    cache: Arc<SnapshotCache>,
    location: Arc<dyn LocationSourcePort>,
    interval: Option<Duration>,
    min_interval: Duration,
    shutdown: CancellationToken,
}

impl SnapshotRefreshJob {
    pub fn new(
        refresh: Arc<RefreshSnapshotUseCase>,
        cache: Arc<SnapshotCache>,
        location: Arc<dyn LocationSourcePort>,
    ) -> Self {
        Self {
            refresh,
            cache,
            location,
            interval: None,
            min_interval: DEFAULT_MIN_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    /// `None` follows the snapshot's suggestion.
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval.filter(|i| !i.is_zero());
        self
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn next_delay(&self) -> Duration {
        let delay = self.interval.unwrap_or_else(|| {
            self.cache
                .current()
                .map(|s| s.suggested_refresh_interval_ms())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(FALLBACK_INTERVAL)
        });
        delay.max(self.min_interval)
    }

    /// One refresh cycle. `None` when no location fix is known yet.
    pub async fn run_once(&self) -> Option<RefreshOutcome> {
        let Some(sample) = self.location.latest() else {
            debug!("SnapshotRefreshJob: no location fix yet, skipping");
            return None;
        };

        let outcome = self.refresh.execute(Some(sample.coordinates), true).await;
        match &outcome {
            RefreshOutcome::Failed(e) => {
                warn!(error = %e, "SnapshotRefreshJob: refresh failed")
            }
            other => debug!(outcome = other.label(), "SnapshotRefreshJob: cycle completed"),
        }
        Some(outcome)
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.map(|i| i.as_secs()),
            min_interval_secs = self.min_interval.as_secs(),
            "Starting snapshot refresh job"
        );

        loop {
            let delay = self.next_delay();
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("SnapshotRefreshJob: shutting down");
                    break;
                }
                _ = tokio::time::sleep(delay) => {
                    self.run_once().await;
                }
            }
        }
    }
}
