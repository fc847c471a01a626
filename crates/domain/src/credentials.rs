use std::sync::Arc;

/// Opaque, pre-issued provider credential. Never rendered in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    pub fn new(value: impl Into<Arc<str>>) -> Result<Self, String> {
        let value: Arc<str> = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Access token cannot be empty".to_string());
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err("Access token contains control characters".to_string());
        }
        if trimmed.len() != value.len() {
            return Ok(Self(Arc::from(trimmed)));
        }
        Ok(Self(value))
    }

    /// The raw token, for the one place that must send it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
