use crate::ports::CredentialStorePort;
use picketline_domain::{AccessToken, DomainError};
use std::sync::Arc;
use tracing::info;

pub struct SetAccessTokenUseCase {
    store: Arc<dyn CredentialStorePort>,
}

impl SetAccessTokenUseCase {
    pub fn new(store: Arc<dyn CredentialStorePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, raw_token: &str) -> Result<(), DomainError> {
        let token = AccessToken::new(raw_token).map_err(DomainError::InvalidToken)?;
        self.store.set(&token).await?;
        info!("Access token stored");
        Ok(())
    }
}
