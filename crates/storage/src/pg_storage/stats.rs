//! StatsStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use salary_survey_core::{PayRangeCount, SurveyFilter};

use crate::filter_sql::{conditions, usize_to_i64};
use crate::traits::StatsStore;
use crate::types::StorageStats;

#[async_trait]
impl StatsStore for PgStorage {
    async fn pay_range_summary(
        &self,
        filter: &SurveyFilter,
        limit: usize,
    ) -> Result<Vec<PayRangeCount>, StorageError> {
        let conds = conditions(filter);
        let sql = format!(
            "SELECT pay_range, COUNT(id) AS count FROM salary_survey{}
             GROUP BY pay_range
             ORDER BY count DESC, pay_range ASC NULLS LAST
             LIMIT ${}",
            pg_where(&conds),
            conds.len() + 1
        );
        let rows = bind_conditions(sqlx::query(&sql), &conds)
            .bind(usize_to_i64(limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<PayRangeCount, StorageError> {
                Ok(PayRangeCount { pay_range: row.try_get("pay_range")?, count: row.try_get("count")? })
            })
            .collect()
    }

    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let survey_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM salary_survey").fetch_one(&self.pool).await?;
        Ok(StorageStats { survey_count: u64::try_from(survey_count).unwrap_or(0) })
    }
}
