use async_trait::async_trait;
use salary_survey_core::{PayRangeCount, SurveyFilter};

use crate::error::StorageError;
use crate::types::StorageStats;

/// Aggregate queries.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Count of filtered records per `pay_range`, largest first, at most `limit` buckets.
    async fn pay_range_summary(
        &self,
        filter: &SurveyFilter,
        limit: usize,
    ) -> Result<Vec<PayRangeCount>, StorageError>;

    /// Get storage statistics.
    async fn get_stats(&self) -> Result<StorageStats, StorageError>;
}
