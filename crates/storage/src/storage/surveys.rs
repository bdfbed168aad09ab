use rusqlite::{params, params_from_iter};
use salary_survey_core::{NewSalarySurvey, SalarySurvey, SurveyFilter};

use super::{Storage, condition_values, get_conn, map_survey, sqlite_where};
use crate::error::StorageError;
use crate::filter_sql::{INSERT_COLUMNS, SURVEY_COLUMNS, conditions, usize_to_i64};
use crate::types::PaginatedResult;

impl Storage {
    /// Insert all records inside one transaction.
    ///
    /// # Errors
    /// Returns error if any insert fails; nothing from the batch is kept.
    pub fn insert_batch(&self, records: &[NewSalarySurvey]) -> Result<u64, StorageError> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut conn = get_conn(&self.pool)?;
        // Rolled back on drop unless committed.
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&format!(
                "INSERT INTO salary_survey ({INSERT_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ))?;
            for r in records {
                stmt.execute(params![
                    r.date,
                    r.title,
                    r.company_size,
                    r.accoms,
                    r.experience,
                    r.currency,
                    r.pay_range,
                    r.area,
                    r.company_origin,
                    r.work_style,
                    r.work_area,
                ])?;
            }
        }
        tx.commit()?;
        let inserted = u64::try_from(records.len()).unwrap_or(u64::MAX);
        tracing::debug!(rows = inserted, "survey batch committed");
        Ok(inserted)
    }

    /// Filtered records ordered by `id`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_surveys(
        &self,
        filter: &SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let conds = conditions(filter);
        let where_sql = sqlite_where(&conds);
        let mut values = condition_values(&conds);

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM salary_survey{where_sql}"),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        let n = conds.len();
        values.push(usize_to_i64(limit).into());
        values.push(usize_to_i64(offset).into());
        let mut stmt = conn.prepare(&format!(
            "SELECT {SURVEY_COLUMNS} FROM salary_survey{where_sql} ORDER BY id LIMIT ?{} OFFSET ?{}",
            n + 1,
            n + 2
        ))?;
        let items = stmt
            .query_map(params_from_iter(values.iter()), map_survey)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedResult {
            items,
            total: u64::try_from(total).unwrap_or(0),
            offset: u64::try_from(offset).unwrap_or(0),
            limit: u64::try_from(limit).unwrap_or(0),
        })
    }
}
