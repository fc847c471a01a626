use async_trait::async_trait;
use picketline_application::ports::CredentialStorePort;
use picketline_domain::{AccessToken, DomainError};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Keeps the token in a single owner-readable file.
///
/// Writes go to a sibling `<name>.tmp` created with mode 0600 and are renamed
/// into place, so the token is never readable by other users.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn storage_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::StorageError(format!(
            "Failed to {} token file {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl CredentialStorePort for FileCredentialStore {
    async fn get(&self) -> Result<Option<AccessToken>, DomainError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("read", e)),
        };

        match AccessToken::new(contents) {
            Ok(token) => Ok(Some(token)),
            Err(reason) => {
                warn!(path = %self.path.display(), reason = %reason, "Ignoring unusable token file");
                Ok(None)
            }
        }
    }

    async fn set(&self, token: &AccessToken) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory for", e))?;
        }

        let staging = self.staging_path();
        match tokio::fs::remove_file(&staging).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(self.storage_error("remove stale staging file for", e)),
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&staging)
            .await
            .map_err(|e| self.storage_error("create staging file for", e))?;
        file.write_all(token.expose().as_bytes())
            .await
            .map_err(|e| self.storage_error("write", e))?;
        file.sync_all()
            .await
            .map_err(|e| self.storage_error("sync", e))?;
        drop(file);

        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| self.storage_error("replace", e))?;

        debug!(path = %self.path.display(), "Token file written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", e)),
        }
    }
}
