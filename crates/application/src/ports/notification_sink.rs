use async_trait::async_trait;
use picketline_domain::DomainError;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// While a key is posted and not withdrawn the sink will not deliver it
    /// again.
    pub dedupe_key: Arc<str>,
}

#[async_trait]
pub trait NotificationSinkPort: Send + Sync {
    /// Returns `false` when the key was already outstanding and nothing was
    /// delivered.
    async fn post(&self, notification: Notification) -> Result<bool, DomainError>;

    async fn withdraw(&self, dedupe_key: &str) -> Result<(), DomainError>;
}
