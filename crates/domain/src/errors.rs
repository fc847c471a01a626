use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("No location sample available yet")]
    NoLocation,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{}", rate_limited_message(*retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    #[error("Invalid field report: {0}")]
    InvalidReport(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn rate_limited_message(retry_after_secs: Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!("Rate limit exceeded, retry after {} seconds", secs),
        None => "Rate limit exceeded, retry later".to_string(),
    }
}

impl DomainError {
    /// Failures that leave previously cached data serving and may clear up
    /// on their own (connectivity, throttling, server trouble).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::NoLocation
                | DomainError::RateLimited { .. }
                | DomainError::ServerError(_)
                | DomainError::TransportError(_)
        )
    }
}
