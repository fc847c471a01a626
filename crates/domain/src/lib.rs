//! Picket Line domain layer: data model, host canonicalization, blocklist
//! matching, geodesy and geofence proximity evaluation.
pub mod action_type;
pub mod blocklist;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod geo;
pub mod geofence;
pub mod host;
pub mod location;
pub mod proximity;
pub mod report;
pub mod snapshot;

pub use action_type::ActionType;
pub use blocklist::{BlocklistIndex, BlocklistRecord};
pub use config::{CliOverrides, Config, ConfigError};
pub use credentials::AccessToken;
pub use errors::DomainError;
pub use geo::{distance_meters, Coordinates, EARTH_RADIUS_METERS};
pub use geofence::{GeofenceDetails, GeofenceRecord};
pub use host::{is_same_or_subdomain, normalize_host};
pub use location::{LocationAuthorization, LocationSample};
pub use proximity::{evaluate, ProximityEvaluation, ProximityHit, ProximityState};
pub use report::{
    ActionSubmission, ActiveAction, EmployerSubmission, FieldReport, LocationReport,
    ReportReceipt, StrikeReport,
};
pub use snapshot::{CachedRegion, ContentHash, Snapshot, SNAPSHOT_SCHEMA_VERSION};
