//! SurveyStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;
use salary_survey_core::{NewSalarySurvey, SurveyFilter};
use sqlx::QueryBuilder;

use crate::filter_sql::{INSERT_COLUMNS, SURVEY_COLUMNS, conditions, usize_to_i64};
use crate::traits::SurveyStore;
use crate::types::PaginatedResult;

/// Rows per multi-row INSERT; 11 binds each keeps us well under the
/// 65535-parameter protocol limit.
const INSERT_CHUNK_ROWS: usize = 1000;

#[async_trait]
impl SurveyStore for PgStorage {
    async fn insert_batch(&self, records: &[NewSalarySurvey]) -> Result<u64, StorageError> {
        if records.is_empty() {
            return Ok(0);
        }
        // Dropping `tx` on an early return rolls the whole batch back.
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0_u64;
        for chunk in records.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<'_, Postgres> =
                QueryBuilder::new(format!("INSERT INTO salary_survey ({INSERT_COLUMNS}) "));
            builder.push_values(chunk, |mut row, r| {
                row.push_bind(r.date)
                    .push_bind(r.title.as_deref())
                    .push_bind(r.company_size)
                    .push_bind(r.accoms.as_deref())
                    .push_bind(r.experience)
                    .push_bind(r.currency.as_deref())
                    .push_bind(r.pay_range.as_deref())
                    .push_bind(r.area.as_deref())
                    .push_bind(r.company_origin.as_deref())
                    .push_bind(r.work_style.as_deref())
                    .push_bind(r.work_area.as_deref());
            });
            let result = builder.build().execute(&mut *tx).await?;
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        tracing::debug!(rows = inserted, "survey batch committed");
        Ok(inserted)
    }

    async fn list_surveys(
        &self,
        filter: &SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, StorageError> {
        let conds = conditions(filter);
        let where_sql = pg_where(&conds);

        let count_sql = format!("SELECT COUNT(*) AS total FROM salary_survey{where_sql}");
        let total: i64 = bind_conditions(sqlx::query(&count_sql), &conds)
            .fetch_one(&self.pool)
            .await?
            .try_get("total")?;

        let n = conds.len();
        let select_sql = format!(
            "SELECT {SURVEY_COLUMNS} FROM salary_survey{where_sql} ORDER BY id LIMIT ${} OFFSET ${}",
            n + 1,
            n + 2
        );
        let rows = bind_conditions(sqlx::query(&select_sql), &conds)
            .bind(usize_to_i64(limit))
            .bind(usize_to_i64(offset))
            .fetch_all(&self.pool)
            .await?;
        let items = rows.iter().map(row_to_survey).collect::<Result<Vec<_>, _>>()?;
        Ok(PaginatedResult {
            items,
            total: u64::try_from(total).unwrap_or(0),
            offset: u64::try_from(offset).unwrap_or(0),
            limit: u64::try_from(limit).unwrap_or(0),
        })
    }
}
