pub mod credentials;
pub mod destinations;
pub mod proximity;
pub mod reports;
pub mod snapshot;

pub use credentials::{ClearAccessTokenUseCase, SetAccessTokenUseCase};
pub use destinations::{CheckDestinationUseCase, DestinationVerdict, GuardDestinationUseCase};
pub use proximity::{
    proximity_notification, HandleLocationUpdateUseCase, LocationUpdateReport,
    TrackProximityUseCase,
};
pub use reports::{ListActiveActionsUseCase, SubmitFieldReportUseCase};
pub use snapshot::{
    CacheStatus, ClearCacheUseCase, GetStatusUseCase, RefreshOutcome, RefreshSnapshotUseCase,
    SnapshotSummary,
};
