use crate::services::SnapshotCache;
use picketline_domain::BlocklistRecord;
use std::sync::Arc;
use tracing::debug;

/// Matches a URL or hostname against the blocklist of the current snapshot.
pub struct CheckDestinationUseCase {
    cache: Arc<SnapshotCache>,
}

impl CheckDestinationUseCase {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    /// `None` when nothing matches, the input has no usable host, or no
    /// snapshot is loaded yet.
    pub fn execute(&self, destination: &str) -> Option<BlocklistRecord> {
        let snapshot = self.cache.current()?;
        let matched = snapshot.find_match(destination).cloned();

        if let Some(record) = &matched {
            debug!(
                destination = %destination,
                host = %record.host,
                employer = %record.employer_name,
                "Destination matches blocklist"
            );
        }
        matched
    }

    pub fn is_blocked(&self, destination: &str) -> bool {
        self.cache
            .current()
            .is_some_and(|snapshot| snapshot.is_blocked(destination))
    }
}
