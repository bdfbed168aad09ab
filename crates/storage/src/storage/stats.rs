use rusqlite::params_from_iter;
use salary_survey_core::{PayRangeCount, SurveyFilter};

use super::{Storage, condition_values, get_conn, sqlite_where};
use crate::error::StorageError;
use crate::filter_sql::{conditions, usize_to_i64};
use crate::types::StorageStats;

impl Storage {
    /// Count of filtered records per `pay_range`, largest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn pay_range_summary(
        &self,
        filter: &SurveyFilter,
        limit: usize,
    ) -> Result<Vec<PayRangeCount>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let conds = conditions(filter);
        let mut values = condition_values(&conds);
        values.push(usize_to_i64(limit).into());
        let mut stmt = conn.prepare(&format!(
            "SELECT pay_range, COUNT(id) AS count FROM salary_survey{}
             GROUP BY pay_range
             ORDER BY count DESC, pay_range ASC NULLS LAST
             LIMIT ?{}",
            sqlite_where(&conds),
            conds.len() + 1
        ))?;
        let buckets = stmt
            .query_map(params_from_iter(values.iter()), |row| {
                Ok(PayRangeCount { pay_range: row.get(0)?, count: row.get(1)? })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(buckets)
    }

    /// Get storage statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let survey_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM salary_survey", [], |row| row.get(0))?;
        Ok(StorageStats { survey_count: u64::try_from(survey_count).unwrap_or(0) })
    }
}
