use async_trait::async_trait;
use picketline_application::ports::KeyValueStorePort;
use picketline_domain::DomainError;
use sqlx::SqlitePool;
use tracing::{error, instrument};

pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStorePort for SqliteKeyValueStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        sqlx::query_scalar::<_, Vec<u8>>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read key");
                DomainError::StorageError(e.to_string())
            })
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), DomainError> {
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to write key");
            DomainError::StorageError(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete key");
                DomainError::StorageError(e.to_string())
            })?;

        Ok(())
    }
}
