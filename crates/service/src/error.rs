//! Typed error enum for the service layer.
//!
//! Separates source-file problems from storage failures so the CLI and HTTP
//! layers can report each one accurately.

use std::path::PathBuf;

use salary_survey_core::SurveyError;
use salary_survey_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying read, write and validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The source file could not be opened or parsed. Nothing was written.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The bulk insert failed and the transaction was rolled back.
    #[error("bulk write failed: attempted {attempted} rows, committed 0: {source}")]
    BulkWrite {
        attempted: usize,
        #[source]
        source: StorageError,
    },

    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (non-finite bounds and the like).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) | Self::BulkWrite { source: e, .. } => e.is_transient(),
            _ => false,
        }
    }
}

impl From<SurveyError> for ServiceError {
    fn from(err: SurveyError) -> Self {
        match err {
            SurveyError::InvalidInput(msg) => Self::InvalidInput(msg),
        }
    }
}
