//! PostgreSQL storage backend using sqlx.

// Arithmetic in DB operations (pagination, counting) is bounded by DB limits
#![allow(
    clippy::arithmetic_side_effects,
    reason = "DB row counts and pagination are bounded by PostgreSQL limits"
)]

mod stats;
mod surveys;

use salary_survey_core::{
    DbConfig, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
    SalarySurvey,
};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::error::StorageError;
use crate::filter_sql::{Condition, FilterValue, TextMatch, where_clause};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(options: PgConnectOptions) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, StorageError> {
        tracing::info!(host = %config.host, port = config.port, db = %config.name, "connecting to PostgreSQL");
        Self::new(connect_options(config)).await
    }

    /// Underlying pool, for maintenance tasks and tests.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Structured connection parameters; credentials never pass through a URL.
pub(crate) fn connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
}

pub(crate) fn pg_where(conds: &[Condition]) -> String {
    where_clause(conds, TextMatch::Ilike, |i| format!("${i}"))
}

pub(crate) fn bind_conditions<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    conds: &'q [Condition],
) -> Query<'q, Postgres, PgArguments> {
    for cond in conds {
        query = match &cond.value {
            FilterValue::Text(s) => query.bind(s.as_str()),
            FilterValue::Real(v) => query.bind(*v),
        };
    }
    query
}

pub(crate) fn row_to_survey(row: &PgRow) -> Result<SalarySurvey, StorageError> {
    Ok(SalarySurvey {
        id: row.try_get("id")?,
        date: row.try_get("date")?,
        title: row.try_get("title")?,
        company_size: row.try_get("company_size")?,
        accoms: row.try_get("accoms")?,
        experience: row.try_get("experience")?,
        currency: row.try_get("currency")?,
        pay_range: row.try_get("pay_range")?,
        area: row.try_get("area")?,
        company_origin: row.try_get("company_origin")?,
        work_style: row.try_get("work_style")?,
        work_area: row.try_get("work_area")?,
    })
}
