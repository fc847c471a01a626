use crate::services::SnapshotCache;
use std::sync::Arc;
use tracing::instrument;

pub struct ClearCacheUseCase {
    cache: Arc<SnapshotCache>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<SnapshotCache>) -> Self {
        Self { cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) {
        self.cache.clear().await;
    }
}
