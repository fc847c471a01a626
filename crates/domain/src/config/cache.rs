use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// SQLite file holding the persisted snapshot and its content hash.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_path() -> String {
    "picketline.db".to_string()
}

fn default_max_connections() -> u32 {
    2
}
