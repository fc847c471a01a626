use super::wire::ErrorBody;
use picketline_domain::DomainError;
use reqwest::StatusCode;

/// Maps a non-success provider response to the domain error taxonomy.
/// `body` is the raw response body, which may carry `{"error", "code"}`.
pub fn map_error_status(status: StatusCode, retry_after: Option<&str>, body: &[u8]) -> DomainError {
    let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.error.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
    let code = parsed.and_then(|b| b.code);

    match status.as_u16() {
        401 | 403 => DomainError::Unauthorized(message),
        429 => DomainError::RateLimited {
            retry_after_secs: retry_after.and_then(|v| v.trim().parse().ok()),
        },
        _ => match code {
            Some(code) => {
                DomainError::ServerError(format!("HTTP {} ({}): {}", status.as_u16(), code, message))
            }
            None => DomainError::ServerError(format!("HTTP {}: {}", status.as_u16(), message)),
        },
    }
}
