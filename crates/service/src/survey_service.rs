use std::sync::Arc;

use salary_survey_core::{
    MAX_QUERY_LIMIT, PAY_RANGE_SUMMARY_LIMIT, PayRangeCount, SalarySurvey, SurveyFilter,
};
use salary_survey_storage::traits::{StatsStore, SurveyStore};
use salary_survey_storage::{PaginatedResult, StorageBackend, StorageStats};

use crate::ServiceError;

/// Read-side queries over stored surveys.
pub struct SurveyService {
    storage: Arc<StorageBackend>,
}

impl SurveyService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// The three most common pay ranges among rows matching `filter`.
    pub async fn pay_range_summary(
        &self,
        filter: SurveyFilter,
    ) -> Result<Vec<PayRangeCount>, ServiceError> {
        let filter = filter.normalized();
        filter.validate()?;
        let summary = self.storage.pay_range_summary(&filter, PAY_RANGE_SUMMARY_LIMIT).await?;
        tracing::debug!(?filter, buckets = summary.len(), "pay range summary");
        Ok(summary)
    }

    /// Filtered records ordered by id. `limit` is capped at `MAX_QUERY_LIMIT`.
    pub async fn list_surveys(
        &self,
        filter: SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, ServiceError> {
        let filter = filter.normalized();
        filter.validate()?;
        Ok(self.storage.list_surveys(&filter, offset, limit.min(MAX_QUERY_LIMIT)).await?)
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.get_stats().await?)
    }
}
