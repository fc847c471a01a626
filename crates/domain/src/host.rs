//! Canonical host extraction.
//!
//! Every host stored in a snapshot and every destination checked against it
//! goes through [`normalize_host`], so both sides of a match are compared in
//! the same form: lowercase, no scheme, no path, no port, and without a single
//! leading `www.` label.

use crate::errors::DomainError;
use url::Url;

const DEFAULT_SCHEME_PREFIX: &str = "https://";
const WWW_LABEL: &str = "www.";

pub fn normalize_host(input: &str) -> Result<String, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidHost("empty input".to_string()));
    }

    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed))
    }
    .map_err(|e| DomainError::InvalidHost(format!("{}: {}", trimmed, e)))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| DomainError::InvalidHost(format!("{}: no host component", trimmed)))?;

    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let host = match host.strip_prefix(WWW_LABEL) {
        Some(rest) => rest.to_string(),
        None => host,
    };

    if host.is_empty() {
        return Err(DomainError::InvalidHost(format!(
            "{}: host is empty after canonicalization",
            trimmed
        )));
    }
    if host.split('.').any(str::is_empty) {
        return Err(DomainError::InvalidHost(format!(
            "{}: empty label in host",
            trimmed
        )));
    }

    Ok(host)
}

/// True when `host` equals `parent` or sits below it on a label boundary.
/// Both arguments must already be canonical.
#[inline]
pub fn is_same_or_subdomain(host: &str, parent: &str) -> bool {
    if host.len() == parent.len() {
        return host == parent;
    }
    host.len() > parent.len()
        && host.ends_with(parent)
        && host.as_bytes()[host.len() - parent.len() - 1] == b'.'
}
