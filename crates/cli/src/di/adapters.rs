use picketline_application::ports::CredentialStorePort;
use picketline_domain::{AccessToken, Config, LocationAuthorization};
use picketline_infrastructure::credentials::{FileCredentialStore, MemoryCredentialStore};
use picketline_infrastructure::http::HttpDataProvider;
use picketline_infrastructure::location::ChannelLocationSource;
use picketline_infrastructure::notifications::TracingNotificationSink;
use picketline_infrastructure::storage::SqliteKeyValueStore;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable that supplies the access token for this process
/// only, bypassing the token file.
pub const TOKEN_ENV_VAR: &str = "PICKETLINE_API_KEY";

pub struct Adapters {
    pub key_value: Arc<SqliteKeyValueStore>,
    pub credentials: Arc<dyn CredentialStorePort>,
    pub provider: Arc<HttpDataProvider>,
    pub notifications: Arc<TracingNotificationSink>,
    pub location: Arc<ChannelLocationSource>,
}

impl Adapters {
    pub fn new(config: &Config, pool: SqlitePool) -> anyhow::Result<Self> {
        let credentials = credential_store(config);
        let provider = HttpDataProvider::new(
            config.api.base_url.clone(),
            Duration::from_secs(config.api.timeout_secs),
            &config.api.user_agent,
            credentials.clone(),
        )?;

        Ok(Self {
            key_value: Arc::new(SqliteKeyValueStore::new(pool)),
            credentials,
            provider: Arc::new(provider),
            notifications: Arc::new(TracingNotificationSink::new()),
            location: Arc::new(ChannelLocationSource::new(LocationAuthorization::Authorized)),
        })
    }
}

fn credential_store(config: &Config) -> Arc<dyn CredentialStorePort> {
    if let Ok(raw) = std::env::var(TOKEN_ENV_VAR) {
        match AccessToken::new(raw) {
            Ok(token) => {
                info!("Using access token from {}", TOKEN_ENV_VAR);
                return Arc::new(MemoryCredentialStore::with_token(token));
            }
            Err(reason) => warn!(reason = %reason, "Ignoring {}", TOKEN_ENV_VAR),
        }
    }
    Arc::new(FileCredentialStore::new(&config.credentials.token_path))
}
