use async_trait::async_trait;
use picketline_domain::{
    ActiveAction, ContentHash, Coordinates, DomainError, FieldReport, ReportReceipt, Snapshot,
};

/// Parameters for one conditional snapshot fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub location: Coordinates,
    pub radius_meters: Option<u32>,
    /// Hash of the snapshot already held, so the provider can answer
    /// [`FetchResult::NotModified`].
    pub previous_hash: Option<ContentHash>,
}

#[derive(Debug)]
pub enum FetchResult {
    Modified(Snapshot),
    NotModified,
}

/// Remote source of snapshots and sink for field reports.
#[async_trait]
pub trait DataProviderPort: Send + Sync {
    async fn fetch_snapshot(&self, request: &FetchRequest) -> Result<FetchResult, DomainError>;

    async fn submit_report(&self, report: &FieldReport) -> Result<ReportReceipt, DomainError>;

    async fn list_active_actions(&self) -> Result<Vec<ActiveAction>, DomainError>;
}
