pub mod location_watch;
pub mod runner;
pub mod snapshot_refresh;

pub use location_watch::LocationWatchJob;
pub use runner::JobRunner;
pub use snapshot_refresh::SnapshotRefreshJob;
