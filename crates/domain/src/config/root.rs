use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::cache::CacheConfig;
use super::credentials::CredentialsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::refresh::RefreshConfig;

const LOCAL_CONFIG_PATH: &str = "picketline.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/picketline/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Data provider endpoint and request settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Durable snapshot storage
    #[serde(default)]
    pub cache: CacheConfig,

    /// Access token storage
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Background refresh cadence
    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. picketline.toml in current directory
    /// 3. /etc/picketline/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.base_url {
            self.api.base_url = url;
        }
        if let Some(db) = overrides.database_path {
            self.cache.database_path = db;
        }
        if let Some(token_path) = overrides.token_path {
            self.credentials.token_path = token_path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Trailing slashes on the base URL would double up when endpoint paths
    /// are appended.
    fn normalize(&mut self) {
        while self.api.base_url.ends_with('/') {
            self.api.base_url.pop();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("must start with http:// or https:// (got '{}')", self.api.base_url),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "cannot be 0"));
        }
        if self.cache.database_path.trim().is_empty() {
            return Err(ConfigError::invalid("cache.database_path", "cannot be empty"));
        }
        if self.cache.max_connections == 0 {
            return Err(ConfigError::invalid("cache.max_connections", "cannot be 0"));
        }
        if self.credentials.token_path.trim().is_empty() {
            return Err(ConfigError::invalid("credentials.token_path", "cannot be empty"));
        }
        if self.refresh.min_interval_secs == 0 {
            return Err(ConfigError::invalid("refresh.min_interval_secs", "cannot be 0"));
        }
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub database_path: Option<String>,
    pub token_path: Option<String>,
    pub log_level: Option<String>,
}
