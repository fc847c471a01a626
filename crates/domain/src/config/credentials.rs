use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// File the access token is kept in (owner read/write only).
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> String {
    "picketline.token".to_string()
}
