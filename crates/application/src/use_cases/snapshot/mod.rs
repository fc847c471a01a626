mod clear_cache;
mod get_status;
mod refresh_snapshot;

pub use clear_cache::ClearCacheUseCase;
pub use get_status::{CacheStatus, GetStatusUseCase, SnapshotSummary};
pub use refresh_snapshot::{RefreshOutcome, RefreshSnapshotUseCase};
