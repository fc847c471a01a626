use async_trait::async_trait;
use picketline_domain::DomainError;

/// Durable byte storage keyed by short string names.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), DomainError>;
    /// Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
