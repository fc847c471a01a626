use super::TrackProximityUseCase;
use crate::use_cases::snapshot::{RefreshOutcome, RefreshSnapshotUseCase};
use picketline_domain::{Coordinates, DomainError, LocationSample, ProximityEvaluation};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct LocationUpdateReport {
    pub refresh: RefreshOutcome,
    pub proximity: ProximityEvaluation,
}

/// Per-sample pipeline: refresh the snapshot when the device has left the
/// cached region, then evaluate geofences against whatever is current.
pub struct HandleLocationUpdateUseCase {
    refresh: Arc<RefreshSnapshotUseCase>,
    proximity: Arc<TrackProximityUseCase>,
}

impl HandleLocationUpdateUseCase {
    pub fn new(refresh: Arc<RefreshSnapshotUseCase>, proximity: Arc<TrackProximityUseCase>) -> Self {
        Self { refresh, proximity }
    }

    #[instrument(skip(self), fields(location = %sample.coordinates))]
    pub async fn execute(&self, sample: LocationSample) -> Result<LocationUpdateReport, DomainError> {
        let location = sample.coordinates;
        Coordinates::validate(location.lat, location.lng)?;

        let refresh = self.refresh.execute(Some(location), false).await;
        let proximity = self.proximity.execute(location).await;

        Ok(LocationUpdateReport { refresh, proximity })
    }
}
