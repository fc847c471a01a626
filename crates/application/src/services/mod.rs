mod blocked_attempts;
mod snapshot_cache;

pub use blocked_attempts::{BlockedAttempt, BlockedAttemptLog, BlockingStats, BLOCKED_COUNT_KEY};
pub use snapshot_cache::{SnapshotCache, CONTENT_HASH_KEY, PAYLOAD_KEY};
