use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationAuthorization {
    NotDetermined,
    Denied,
    Authorized,
}

impl LocationAuthorization {
    pub fn is_authorized(&self) -> bool {
        matches!(self, LocationAuthorization::Authorized)
    }
}

/// One position fix from the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub coordinates: Coordinates,
    pub recorded_at: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            recorded_at: Utc::now(),
        }
    }
}
