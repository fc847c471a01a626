use crate::ports::CredentialStorePort;
use crate::services::{BlockedAttemptLog, BlockingStats, SnapshotCache};
use chrono::{DateTime, Utc};
use picketline_domain::{CachedRegion, ContentHash, DomainError, Snapshot};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub content_hash: ContentHash,
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub region: CachedRegion,
    pub suggested_refresh_interval_ms: u64,
    pub blocklist_records: usize,
    pub blocked_hosts: usize,
    pub geofences: usize,
}

impl SnapshotSummary {
    fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            content_hash: snapshot.content_hash().clone(),
            schema_version: snapshot.schema_version().to_string(),
            generated_at: snapshot.generated_at(),
            region: *snapshot.region(),
            suggested_refresh_interval_ms: snapshot.suggested_refresh_interval_ms(),
            blocklist_records: snapshot.blocklist().len(),
            blocked_hosts: snapshot.index().host_count(),
            geofences: snapshot.geofences().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub snapshot: Option<SnapshotSummary>,
    pub last_checked: Option<DateTime<Utc>>,
    pub has_access_token: bool,
    /// Refused attempts across sessions.
    pub blocked_count: u64,
    pub session: BlockingStats,
}

pub struct GetStatusUseCase {
    cache: Arc<SnapshotCache>,
    credentials: Arc<dyn CredentialStorePort>,
    attempts: Arc<BlockedAttemptLog>,
}

impl GetStatusUseCase {
    pub fn new(
        cache: Arc<SnapshotCache>,
        credentials: Arc<dyn CredentialStorePort>,
        attempts: Arc<BlockedAttemptLog>,
    ) -> Self {
        Self {
            cache,
            credentials,
            attempts,
        }
    }

    pub async fn execute(&self) -> Result<CacheStatus, DomainError> {
        let has_access_token = self.credentials.get().await?.is_some();

        Ok(CacheStatus {
            snapshot: self
                .cache
                .current()
                .map(|snapshot| SnapshotSummary::from_snapshot(&snapshot)),
            last_checked: self.cache.last_checked(),
            has_access_token,
            blocked_count: self.attempts.blocked_count(),
            session: self.attempts.stats().await,
        })
    }
}
