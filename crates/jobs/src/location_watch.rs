use picketline_application::ports::LocationSourcePort;
use picketline_application::use_cases::HandleLocationUpdateUseCase;
use picketline_domain::LocationSample;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Feeds every location fix through [`HandleLocationUpdateUseCase`].
///
/// Fixes are consumed latest-wins: a fix that is superseded before the
/// previous one finished processing is skipped. A fix still pending at
/// shutdown is processed before the job exits.
pub struct LocationWatchJob {
    handler: Arc<HandleLocationUpdateUseCase>,
    location: Arc<dyn LocationSourcePort>,
    processed: AtomicU64,
    shutdown: CancellationToken,
}

impl LocationWatchJob {
    pub fn new(
        handler: Arc<HandleLocationUpdateUseCase>,
        location: Arc<dyn LocationSourcePort>,
    ) -> Self {
        Self {
            handler,
            location,
            processed: AtomicU64::new(0),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    async fn process(&self, sample: LocationSample) {
        match self.handler.execute(sample).await {
            Ok(report) => {
                self.processed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    refresh = report.refresh.label(),
                    near = report.proximity.hits.len(),
                    entered = report.proximity.new_entries.len(),
                    exited = report.proximity.exits.len(),
                    "LocationWatchJob: fix processed"
                );
            }
            Err(e) => warn!(error = %e, "LocationWatchJob: fix rejected"),
        }
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            authorization = ?self.location.authorization(),
            "Starting location watch job"
        );

        let mut rx = self.location.subscribe();
        let initial = *rx.borrow_and_update();
        if let Some(sample) = initial {
            self.process(sample).await;
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    if rx.has_changed().unwrap_or(false) {
                        let pending = *rx.borrow_and_update();
                        if let Some(sample) = pending {
                            self.process(sample).await;
                        }
                    }
                    info!(processed = self.processed(), "LocationWatchJob: shutting down");
                    break;
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        info!("LocationWatchJob: location source closed");
                        break;
                    }
                    let sample = *rx.borrow_and_update();
                    if let Some(sample) = sample {
                        self.process(sample).await;
                    }
                }
            }
        }
    }
}
