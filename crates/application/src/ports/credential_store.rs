use async_trait::async_trait;
use picketline_domain::{AccessToken, DomainError};

#[async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn get(&self) -> Result<Option<AccessToken>, DomainError>;
    async fn set(&self, token: &AccessToken) -> Result<(), DomainError>;
    async fn clear(&self) -> Result<(), DomainError>;
}
