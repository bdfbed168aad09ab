//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;
#[cfg(feature = "postgres")]
use salary_survey_core::DbConfig;
use salary_survey_core::{NewSalarySurvey, PayRangeCount, SalarySurvey, SurveyFilter};

use crate::error::StorageError;
use crate::traits::{StatsStore, SurveyStore};
use crate::types::{PaginatedResult, StorageStats};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::Storage::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(config: &DbConfig) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::from_config(config).await?))
    }

    /// Short backend name for logs and the health endpoint.
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── SurveyStore ──────────────────────────────────────────────────

#[async_trait]
impl SurveyStore for StorageBackend {
    async fn insert_batch(&self, records: &[NewSalarySurvey]) -> Result<u64, StorageError> {
        dispatch!(self, SurveyStore, insert_batch(records))
    }

    async fn list_surveys(
        &self,
        filter: &SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, StorageError> {
        dispatch!(self, SurveyStore, list_surveys(filter, offset, limit))
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for StorageBackend {
    async fn pay_range_summary(
        &self,
        filter: &SurveyFilter,
        limit: usize,
    ) -> Result<Vec<PayRangeCount>, StorageError> {
        dispatch!(self, StatsStore, pay_range_summary(filter, limit))
    }

    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        dispatch!(self, StatsStore, get_stats())
    }
}
