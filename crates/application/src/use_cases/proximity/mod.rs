mod handle_location_update;
mod track_proximity;

pub use handle_location_update::{HandleLocationUpdateUseCase, LocationUpdateReport};
pub use track_proximity::{proximity_notification, TrackProximityUseCase};
