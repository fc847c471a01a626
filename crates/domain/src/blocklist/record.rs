use crate::action_type::ActionType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One blocked destination. `host` is canonical (see [`crate::normalize_host`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocklistRecord {
    pub host: Arc<str>,
    pub employer_id: Arc<str>,
    pub employer_name: Arc<str>,
    pub action_type: ActionType,
    pub action_id: Arc<str>,
}

impl BlocklistRecord {
    pub fn new(
        host: Arc<str>,
        employer_id: Arc<str>,
        employer_name: Arc<str>,
        action_type: ActionType,
        action_id: Arc<str>,
    ) -> Self {
        Self {
            host,
            employer_id,
            employer_name,
            action_type,
            action_id,
        }
    }

    /// Records are identified by employer and host together.
    pub fn identity(&self) -> (Arc<str>, Arc<str>) {
        (Arc::clone(&self.employer_id), Arc::clone(&self.host))
    }
}
