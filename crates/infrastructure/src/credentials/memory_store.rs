use async_trait::async_trait;
use picketline_application::ports::CredentialStorePort;
use picketline_domain::{AccessToken, DomainError};
use tokio::sync::RwLock;

/// Process-lifetime token holder, for token values supplied through the
/// environment.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl CredentialStorePort for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<AccessToken>, DomainError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &AccessToken) -> Result<(), DomainError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.token.write().await = None;
        Ok(())
    }
}
