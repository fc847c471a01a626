use crate::ports::{DataProviderPort, FetchRequest, FetchResult};
use crate::services::SnapshotCache;
use picketline_domain::{Coordinates, DomainError, Snapshot};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub enum RefreshOutcome {
    /// A new snapshot was fetched and is now current.
    Updated(Arc<Snapshot>),
    Unchanged,
    /// The cached snapshot, if any, is still being served.
    Failed(DomainError),
}

impl RefreshOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RefreshOutcome::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            RefreshOutcome::Updated(_) => "updated",
            RefreshOutcome::Unchanged => "unchanged",
            RefreshOutcome::Failed(_) => "failed",
        }
    }
}

type FlightSender = Arc<watch::Sender<Option<RefreshOutcome>>>;
type FlightSlot = Mutex<Option<FlightSender>>;

enum Flight {
    Leader(FlightSender),
    Follower(watch::Receiver<Option<RefreshOutcome>>),
}

fn lock_slot(slot: &FlightSlot) -> MutexGuard<'_, Option<FlightSender>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Releases the flight and wakes followers, also when the leader future is
/// dropped mid-fetch (followers then see `None` and retry).
struct FlightLeaderGuard<'a> {
    slot: &'a FlightSlot,
    tx: FlightSender,
    outcome: Option<RefreshOutcome>,
}

impl Drop for FlightLeaderGuard<'_> {
    fn drop(&mut self) {
        let mut slot = lock_slot(self.slot);
        if slot
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &self.tx))
        {
            *slot = None;
        }
        drop(slot);
        let _ = self.tx.send(self.outcome.take());
    }
}

/// Decides when to contact the provider and applies the answer to the
/// [`SnapshotCache`]. It is the only writer of the cache's snapshot.
///
/// At most one fetch is in flight; concurrent callers wait for it and share
/// its outcome.
pub struct RefreshSnapshotUseCase {
    provider: Arc<dyn DataProviderPort>,
    cache: Arc<SnapshotCache>,
    fetch_timeout: Duration,
    radius_override: Option<u32>,
    inflight: FlightSlot,
}

impl RefreshSnapshotUseCase {
    pub fn new(
        provider: Arc<dyn DataProviderPort>,
        cache: Arc<SnapshotCache>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            fetch_timeout,
            radius_override: None,
            inflight: Mutex::new(None),
        }
    }

    pub fn with_radius_override(mut self, radius_meters: Option<u32>) -> Self {
        self.radius_override = radius_meters;
        self
    }

    /// `force` skips the displacement check; the cached hash is still sent,
    /// so an unchanged feed costs no payload.
    #[instrument(skip(self))]
    pub async fn execute(&self, location: Option<Coordinates>, force: bool) -> RefreshOutcome {
        let Some(location) = location else {
            debug!("No location sample, refresh skipped");
            return RefreshOutcome::Failed(DomainError::NoLocation);
        };

        if !force && !self.cache.should_refresh(location) {
            debug!("Within refresh threshold of cached region");
            return RefreshOutcome::Unchanged;
        }

        loop {
            match self.register_or_join_flight() {
                Flight::Leader(tx) => return self.refresh_as_leader(location, tx).await,
                Flight::Follower(rx) => {
                    if let Some(outcome) = Self::refresh_as_follower(rx).await {
                        return outcome;
                    }
                    debug!("In-flight refresh abandoned, retrying");
                }
            }
        }
    }

    fn register_or_join_flight(&self) -> Flight {
        let mut slot = lock_slot(&self.inflight);
        match slot.as_ref() {
            Some(tx) => Flight::Follower(tx.subscribe()),
            None => {
                let (tx, _rx) = watch::channel(None::<RefreshOutcome>);
                let tx = Arc::new(tx);
                *slot = Some(Arc::clone(&tx));
                Flight::Leader(tx)
            }
        }
    }

    async fn refresh_as_follower(
        mut rx: watch::Receiver<Option<RefreshOutcome>>,
    ) -> Option<RefreshOutcome> {
        debug!("Joining in-flight refresh");
        rx.changed().await.ok()?;
        let outcome = rx.borrow().clone();
        outcome
    }

    async fn refresh_as_leader(&self, location: Coordinates, tx: FlightSender) -> RefreshOutcome {
        let mut guard = FlightLeaderGuard {
            slot: &self.inflight,
            tx,
            outcome: None,
        };

        let outcome = self.fetch_and_apply(location).await;
        guard.outcome = Some(outcome.clone());
        drop(guard);
        outcome
    }

    async fn fetch_and_apply(&self, location: Coordinates) -> RefreshOutcome {
        let generation = self.cache.generation();
        let request = FetchRequest {
            location,
            radius_meters: self.radius_override,
            previous_hash: self.cache.content_hash(),
        };

        debug!(
            previous_hash = ?request.previous_hash.as_ref().map(|h| h.as_str()),
            radius_meters = ?request.radius_meters,
            "Fetching snapshot"
        );

        let result =
            match tokio::time::timeout(self.fetch_timeout, self.provider.fetch_snapshot(&request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(DomainError::TransportError(format!(
                    "snapshot fetch timed out after {:?}",
                    self.fetch_timeout
                ))),
            };

        match result {
            Ok(FetchResult::NotModified) => {
                self.cache.mark_checked_if_generation(generation);
                info!("Snapshot not modified");
                RefreshOutcome::Unchanged
            }
            Ok(FetchResult::Modified(snapshot)) => {
                let Some(snapshot) = self.cache.replace_if_generation(generation, snapshot) else {
                    info!("Snapshot cache cleared during fetch, payload dropped");
                    return RefreshOutcome::Unchanged;
                };
                self.cache.mark_checked_if_generation(generation);
                if let Err(e) = self.cache.persist_if_generation(generation).await {
                    warn!(error = %e, "Failed to persist refreshed snapshot");
                }
                RefreshOutcome::Updated(snapshot)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    transient = e.is_transient(),
                    "Snapshot refresh failed, keeping cached data"
                );
                RefreshOutcome::Failed(e)
            }
        }
    }
}
