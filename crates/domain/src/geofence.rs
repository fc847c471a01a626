use crate::action_type::ActionType;
use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A circular alert zone around a dispute location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceRecord {
    pub id: Arc<str>,
    pub action_id: Arc<str>,
    pub employer_id: Arc<str>,
    pub employer_name: Arc<str>,
    pub action_type: ActionType,
    pub coordinates: Coordinates,
    pub notification_radius_meters: u32,
    /// Distance from the point the snapshot was generated for. Informational.
    pub distance_meters: u32,
    #[serde(default)]
    pub details: GeofenceDetails,
}

/// Optional descriptive fields shown alongside an alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeofenceDetails {
    pub organization: Option<Arc<str>>,
    pub location: Option<Arc<str>>,
    pub location_name: Option<Arc<str>>,
    pub location_type: Option<Arc<str>>,
    pub description: Option<Arc<str>>,
    pub demands: Option<Arc<str>>,
    pub start_date: Option<Arc<str>>,
    pub end_date: Option<Arc<str>>,
    pub more_info_url: Option<Arc<str>>,
}

impl GeofenceRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Arc<str>,
        action_id: Arc<str>,
        employer_id: Arc<str>,
        employer_name: Arc<str>,
        action_type: ActionType,
        coordinates: Coordinates,
        notification_radius_meters: u32,
        distance_meters: u32,
    ) -> Self {
        Self {
            id,
            action_id,
            employer_id,
            employer_name,
            action_type,
            coordinates,
            notification_radius_meters,
            distance_meters,
            details: GeofenceDetails::default(),
        }
    }

    pub fn with_details(mut self, details: GeofenceDetails) -> Self {
        self.details = details;
        self
    }

    /// Best available place description for alert text.
    pub fn place_label(&self) -> Option<&str> {
        self.details
            .location_name
            .as_deref()
            .or(self.details.location.as_deref())
    }
}
