use crate::ports::{Notification, NotificationSinkPort};
use crate::services::SnapshotCache;
use picketline_domain::{evaluate, Coordinates, GeofenceRecord, ProximityEvaluation, ProximityState};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Alert text for entering `geofence`, keyed by the geofence id.
pub fn proximity_notification(geofence: &GeofenceRecord) -> Notification {
    let action = geofence.action_type.display_name();
    Notification {
        title: format!("Active {} Nearby", action),
        body: format!(
            "Workers at {} have an active {}. You are near {}.",
            geofence.employer_name,
            action.to_lowercase(),
            geofence.place_label().unwrap_or("a picket location")
        ),
        dedupe_key: Arc::clone(&geofence.id),
    }
}

/// Runs the proximity evaluator for each location sample and turns entries
/// and exits into notifications. Owns the proximity state between samples.
pub struct TrackProximityUseCase {
    cache: Arc<SnapshotCache>,
    sink: Arc<dyn NotificationSinkPort>,
    state: Mutex<ProximityState>,
}

impl TrackProximityUseCase {
    pub fn new(cache: Arc<SnapshotCache>, sink: Arc<dyn NotificationSinkPort>) -> Self {
        Self {
            cache,
            sink,
            state: Mutex::new(ProximityState::new()),
        }
    }

    pub async fn execute(&self, location: Coordinates) -> ProximityEvaluation {
        let snapshot = self.cache.current();
        let geofences = snapshot.as_deref().map(|s| s.geofences()).unwrap_or(&[]);

        // held across delivery so samples are announced in arrival order
        let mut state = self.state.lock().await;
        let evaluation = evaluate(location, geofences, &state);
        *state = evaluation.updated_state.clone();

        debug!(
            location = %location,
            hits = evaluation.hits.len(),
            new_entries = evaluation.new_entries.len(),
            exits = evaluation.exits.len(),
            "Proximity evaluated"
        );

        for hit in &evaluation.new_entries {
            match self.sink.post(proximity_notification(&hit.geofence)).await {
                Ok(true) => info!(
                    geofence_id = %hit.geofence.id,
                    employer = %hit.geofence.employer_name,
                    distance_meters = hit.distance_meters.round(),
                    "Proximity alert posted"
                ),
                Ok(false) => debug!(geofence_id = %hit.geofence.id, "Proximity alert already outstanding"),
                Err(e) => warn!(geofence_id = %hit.geofence.id, error = %e, "Failed to post proximity alert"),
            }
        }

        for geofence_id in &evaluation.exits {
            if let Err(e) = self.sink.withdraw(geofence_id).await {
                warn!(geofence_id = %geofence_id, error = %e, "Failed to withdraw proximity alert");
            }
        }

        evaluation
    }

    pub async fn state(&self) -> ProximityState {
        self.state.lock().await.clone()
    }

    /// Forgets which geofences were near, so the next sample announces every
    /// hit again.
    pub async fn reset(&self) {
        *self.state.lock().await = ProximityState::new();
    }
}
