use crate::ports::CredentialStorePort;
use crate::services::SnapshotCache;
use picketline_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ClearAccessTokenUseCase {
    store: Arc<dyn CredentialStorePort>,
    cache: Arc<SnapshotCache>,
}

impl ClearAccessTokenUseCase {
    pub fn new(store: Arc<dyn CredentialStorePort>, cache: Arc<SnapshotCache>) -> Self {
        Self { store, cache }
    }

    /// With `clear_cache` the snapshot fetched under the old token is dropped
    /// as well.
    #[instrument(skip(self))]
    pub async fn execute(&self, clear_cache: bool) -> Result<(), DomainError> {
        self.store.clear().await?;
        info!("Access token cleared");

        if clear_cache {
            self.cache.clear().await;
        }
        Ok(())
    }
}
