use super::CheckDestinationUseCase;
use crate::services::BlockedAttemptLog;
use picketline_domain::{BlocklistRecord, DomainError};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationVerdict {
    Clear,
    /// On the blocklist, but the user already chose to proceed this session.
    AllowedForSession(BlocklistRecord),
    Blocked(BlocklistRecord),
}

impl DestinationVerdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, DestinationVerdict::Blocked(_))
    }
}

/// [`CheckDestinationUseCase`] plus the session bookkeeping around it: every
/// refused destination is logged and counted, and destinations the user
/// allowed are not flagged again until the session ends.
pub struct GuardDestinationUseCase {
    check: Arc<CheckDestinationUseCase>,
    attempts: Arc<BlockedAttemptLog>,
}

impl GuardDestinationUseCase {
    pub fn new(check: Arc<CheckDestinationUseCase>, attempts: Arc<BlockedAttemptLog>) -> Self {
        Self { check, attempts }
    }

    pub async fn execute(&self, destination: &str) -> DestinationVerdict {
        let Some(record) = self.check.execute(destination) else {
            return DestinationVerdict::Clear;
        };

        if self.attempts.is_allowed(destination).await {
            debug!(destination = %destination, "Destination allowed earlier this session");
            return DestinationVerdict::AllowedForSession(record);
        }

        if let Err(e) = self.attempts.record(destination, &record, false).await {
            warn!(error = %e, "Failed to persist blocked count");
        }
        DestinationVerdict::Blocked(record)
    }

    /// Lets a blocked destination through for the rest of the session.
    /// `None` when the destination is not on the blocklist.
    pub async fn allow(&self, destination: &str) -> Option<BlocklistRecord> {
        let record = self.check.execute(destination)?;
        if let Err(e) = self.attempts.allow(destination, &record).await {
            warn!(error = %e, "Failed to record allowed destination");
        }
        Some(record)
    }

    pub async fn reset_stats(&self) -> Result<(), DomainError> {
        self.attempts.reset().await
    }
}
