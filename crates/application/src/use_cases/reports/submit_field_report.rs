use crate::ports::DataProviderPort;
use picketline_domain::{DomainError, FieldReport, ReportReceipt};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct SubmitFieldReportUseCase {
    provider: Arc<dyn DataProviderPort>,
}

impl SubmitFieldReportUseCase {
    pub fn new(provider: Arc<dyn DataProviderPort>) -> Self {
        Self { provider }
    }

    #[instrument(skip(self, report), fields(kind = report.kind()))]
    pub async fn execute(&self, report: FieldReport) -> Result<ReportReceipt, DomainError> {
        report.validate().map_err(DomainError::InvalidReport)?;

        let receipt = self.provider.submit_report(&report).await?;

        info!(
            kind = report.kind(),
            report_id = %receipt.id,
            "Field report submitted"
        );

        Ok(receipt)
    }
}
