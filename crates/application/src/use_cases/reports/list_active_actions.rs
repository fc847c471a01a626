use crate::ports::DataProviderPort;
use picketline_domain::{ActiveAction, DomainError};
use std::sync::Arc;
use tracing::debug;

pub struct ListActiveActionsUseCase {
    provider: Arc<dyn DataProviderPort>,
}

impl ListActiveActionsUseCase {
    pub fn new(provider: Arc<dyn DataProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self) -> Result<Vec<ActiveAction>, DomainError> {
        let actions = self.provider.list_active_actions().await?;
        debug!(count = actions.len(), "Active actions listed");
        Ok(actions)
    }
}
