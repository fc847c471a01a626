use super::status::map_error_status;
use super::wire::{self, ActiveStrikesResponse, SubmissionResponse};
use async_trait::async_trait;
use picketline_application::ports::{
    CredentialStorePort, DataProviderPort, FetchRequest, FetchResult,
};
use picketline_domain::{AccessToken, ActiveAction, DomainError, FieldReport, ReportReceipt};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, ETAG, IF_NONE_MATCH, RETRY_AFTER};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

const API_KEY_HEADER: &str = "X-API-Key";
const CONTENT_HASH_HEADER: &str = "X-Content-Hash";
const JSON: &str = "application/json";

/// [`DataProviderPort`] over the provider's mobile JSON API.
///
/// The access token is read from the credential store on every request, so
/// a token set or cleared at runtime takes effect immediately.
pub struct HttpDataProvider {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStorePort>,
}

impl HttpDataProvider {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
        credentials: Arc<dyn CredentialStorePort>,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::TransportError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> Result<AccessToken, DomainError> {
        self.credentials
            .get()
            .await?
            .ok_or_else(|| DomainError::Unauthorized("No access token configured".to_string()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let token = self.token().await?;
        request
            .header(API_KEY_HEADER, token.expose())
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(transport_error)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let response = ensure_success(response).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| DomainError::DecodeError(e.to_string()))
    }
}

#[async_trait]
impl DataProviderPort for HttpDataProvider {
    #[instrument(skip(self, request), fields(location = %request.location))]
    async fn fetch_snapshot(&self, request: &FetchRequest) -> Result<FetchResult, DomainError> {
        let mut query = vec![
            ("lat", request.location.lat.to_string()),
            ("lng", request.location.lng.to_string()),
        ];
        if let Some(radius) = request.radius_meters {
            query.push(("radius", radius.to_string()));
        }

        let mut builder = self.client.get(self.url("/mobile/data"));
        if let Some(hash) = &request.previous_hash {
            query.push(("hash", hash.as_str().to_string()));
            builder = builder.header(IF_NONE_MATCH, format!("\"{}\"", hash));
        }

        let response = self.send(builder.query(&query)).await?;

        if response.status() == StatusCode::NOT_MODIFIED {
            debug!("Provider reports snapshot not modified");
            return Ok(FetchResult::NotModified);
        }

        let response = ensure_success(response).await?;
        let header_hash = header_content_hash(response.headers());
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(bytes = body.len(), "Snapshot payload received");
        wire::decode_snapshot(&body, header_hash).map(FetchResult::Modified)
    }

    #[instrument(skip(self, report), fields(kind = report.kind()))]
    async fn submit_report(&self, report: &FieldReport) -> Result<ReportReceipt, DomainError> {
        let (path, body) = wire::encode_report(report)?;

        let builder = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, JSON)
            .body(body);

        let response = self.send(builder).await?;
        let submission: SubmissionResponse = Self::read_json(response).await?;
        Ok(submission.into())
    }

    #[instrument(skip(self))]
    async fn list_active_actions(&self) -> Result<Vec<ActiveAction>, DomainError> {
        let response = self
            .send(self.client.get(self.url("/mobile/active-strikes")))
            .await?;
        let listing: ActiveStrikesResponse = Self::read_json(response).await?;

        debug!(count = listing.count, "Active strikes received");
        Ok(listing
            .strikes
            .into_iter()
            .map(|strike| strike.into_action())
            .collect())
    }
}

async fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().await.unwrap_or_default();

    Err(map_error_status(status, retry_after.as_deref(), &body))
}

fn header_content_hash(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_HASH_HEADER)
        .or_else(|| headers.get(ETAG))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().trim_start_matches("W/").trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

fn transport_error(e: reqwest::Error) -> DomainError {
    if e.is_decode() {
        DomainError::DecodeError(e.to_string())
    } else {
        DomainError::TransportError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_content_hash_header_preferred_over_etag() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("\"etag-hash\""));
        headers.insert(CONTENT_HASH_HEADER, HeaderValue::from_static("body-hash"));
        assert_eq!(header_content_hash(&headers).as_deref(), Some("body-hash"));
    }

    #[test]
    fn test_etag_quotes_and_weak_prefix_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("W/\"abc123\""));
        assert_eq!(header_content_hash(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_no_hash_headers() {
        assert_eq!(header_content_hash(&HeaderMap::new()), None);
    }
}
