use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised by the core domain layer.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, SurveyError>;
