use crate::ports::KeyValueStorePort;
use chrono::{DateTime, Utc};
use picketline_domain::{BlocklistRecord, DomainError};
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const BLOCKED_COUNT_KEY: &str = "blocked.count";

/// One time a destination on the blocklist was reached for.
#[derive(Debug, Clone, Serialize)]
pub struct BlockedAttempt {
    pub destination: String,
    pub host: Arc<str>,
    pub employer_id: Arc<str>,
    pub action_id: Arc<str>,
    pub at: DateTime<Utc>,
    /// The user chose to proceed anyway.
    pub allowed: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockingStats {
    pub total: usize,
    pub allowed: usize,
    pub blocked: usize,
}

/// Session log of blocked attempts plus the durable blocked counter.
///
/// The attempt list and the allow-for-session set live in memory only; the
/// counter of refused attempts survives restarts through the key-value store.
pub struct BlockedAttemptLog {
    store: Arc<dyn KeyValueStorePort>,
    blocked_count: AtomicU64,
    attempts: RwLock<Vec<BlockedAttempt>>,
    allowed_this_session: RwLock<FxHashSet<String>>,
}

fn session_key(destination: &str) -> String {
    destination.trim().to_string()
}

impl BlockedAttemptLog {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            store,
            blocked_count: AtomicU64::new(0),
            attempts: RwLock::new(Vec::new()),
            allowed_this_session: RwLock::new(FxHashSet::default()),
        }
    }

    /// Loads the persisted counter. Unreadable values count as zero.
    pub async fn restore(&self) -> u64 {
        let count = match self.store.get(BLOCKED_COUNT_KEY).await {
            Ok(Some(bytes)) => match String::from_utf8_lossy(&bytes).trim().parse::<u64>() {
                Ok(count) => count,
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable blocked count");
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "Failed to load blocked count");
                0
            }
        };
        self.blocked_count.store(count, Ordering::Release);
        debug!(count, "Blocked count restored");
        count
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked_count.load(Ordering::Acquire)
    }

    pub async fn is_allowed(&self, destination: &str) -> bool {
        self.allowed_this_session
            .read()
            .await
            .contains(&session_key(destination))
    }

    /// Appends an attempt. Refused attempts bump the durable counter; a
    /// failed write leaves the in-memory count ahead of storage.
    pub async fn record(
        &self,
        destination: &str,
        record: &BlocklistRecord,
        allowed: bool,
    ) -> Result<(), DomainError> {
        self.attempts.write().await.push(BlockedAttempt {
            destination: session_key(destination),
            host: Arc::clone(&record.host),
            employer_id: Arc::clone(&record.employer_id),
            action_id: Arc::clone(&record.action_id),
            at: Utc::now(),
            allowed,
        });

        if allowed {
            return Ok(());
        }
        let count = self.blocked_count.fetch_add(1, Ordering::AcqRel) + 1;
        self.store
            .put(BLOCKED_COUNT_KEY, count.to_string().as_bytes())
            .await
    }

    /// Lets `destination` through for the rest of the session and logs the
    /// decision.
    pub async fn allow(
        &self,
        destination: &str,
        record: &BlocklistRecord,
    ) -> Result<(), DomainError> {
        self.allowed_this_session
            .write()
            .await
            .insert(session_key(destination));
        info!(
            destination = %destination.trim(),
            host = %record.host,
            "Destination allowed for session"
        );
        self.record(destination, record, true).await
    }

    pub async fn attempts(&self) -> Vec<BlockedAttempt> {
        self.attempts.read().await.clone()
    }

    pub async fn stats(&self) -> BlockingStats {
        let attempts = self.attempts.read().await;
        let allowed = attempts.iter().filter(|a| a.allowed).count();
        BlockingStats {
            total: attempts.len(),
            allowed,
            blocked: attempts.len() - allowed,
        }
    }

    /// Forgets every allow decision; logged attempts are kept.
    pub async fn end_session(&self) {
        self.allowed_this_session.write().await.clear();
    }

    /// Drops the log, the allow set and the durable counter.
    pub async fn reset(&self) -> Result<(), DomainError> {
        self.attempts.write().await.clear();
        self.allowed_this_session.write().await.clear();
        self.blocked_count.store(0, Ordering::Release);
        self.store.delete(BLOCKED_COUNT_KEY).await?;
        info!("Blocked attempt statistics reset");
        Ok(())
    }
}
