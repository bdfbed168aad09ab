use async_trait::async_trait;
use salary_survey_core::{NewSalarySurvey, SalarySurvey, SurveyFilter};

use crate::error::StorageError;
use crate::types::PaginatedResult;

/// Survey record persistence.
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Insert all records in one transaction. Either every record is stored
    /// or none is. Returns the number of rows inserted.
    async fn insert_batch(&self, records: &[NewSalarySurvey]) -> Result<u64, StorageError>;

    /// Filtered records ordered by `id`.
    async fn list_surveys(
        &self,
        filter: &SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, StorageError>;
}
