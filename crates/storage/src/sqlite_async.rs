//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use salary_survey_core::{NewSalarySurvey, PayRangeCount, SalarySurvey, SurveyFilter};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::{StatsStore, SurveyStore};
use crate::types::{PaginatedResult, StorageStats};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Blocking(format!("spawn_blocking join error: {e}")))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`      clones a `&T`, passes `&arg`
/// - `@slice arg`    copies a `&[T]` into a `Vec`, passes `&arg`
/// - `@val arg`      moves directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── SurveyStore ──────────────────────────────────────────────────

#[async_trait]
impl SurveyStore for Storage {
    async fn insert_batch(&self, records: &[NewSalarySurvey]) -> Result<u64, StorageError> {
        delegate!(self, insert_batch, @slice records)
    }
    async fn list_surveys(
        &self,
        filter: &SurveyFilter,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<SalarySurvey>, StorageError> {
        delegate!(self, list_surveys, @ref filter, @val offset, @val limit)
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for Storage {
    async fn pay_range_summary(
        &self,
        filter: &SurveyFilter,
        limit: usize,
    ) -> Result<Vec<PayRangeCount>, StorageError> {
        delegate!(self, pay_range_summary, @ref filter, @val limit)
    }
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        delegate!(self, get_stats)
    }
}
