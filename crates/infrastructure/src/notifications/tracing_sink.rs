use async_trait::async_trait;
use dashmap::DashSet;
use picketline_application::ports::{Notification, NotificationSinkPort};
use picketline_domain::DomainError;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tracing::{debug, info};

/// Delivers alerts as structured log events. A key stays outstanding until
/// withdrawn, and posting it again meanwhile is a no-op.
pub struct TracingNotificationSink {
    outstanding: DashSet<Arc<str>, FxBuildHasher>,
}

impl TracingNotificationSink {
    pub fn new() -> Self {
        Self {
            outstanding: DashSet::with_hasher(FxBuildHasher),
        }
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }
}

impl Default for TracingNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSinkPort for TracingNotificationSink {
    async fn post(&self, notification: Notification) -> Result<bool, DomainError> {
        if !self.outstanding.insert(Arc::clone(&notification.dedupe_key)) {
            debug!(key = %notification.dedupe_key, "Notification already outstanding");
            return Ok(false);
        }

        info!(
            target: "picketline::alert",
            key = %notification.dedupe_key,
            title = %notification.title,
            body = %notification.body,
            "ALERT"
        );
        Ok(true)
    }

    async fn withdraw(&self, dedupe_key: &str) -> Result<(), DomainError> {
        if self.outstanding.remove(dedupe_key).is_some() {
            debug!(key = %dedupe_key, "Notification withdrawn");
        }
        Ok(())
    }
}
