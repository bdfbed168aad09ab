//! Storage layer for salary-survey
//!
//! One `salary_survey` table behind two interchangeable backends: PostgreSQL
//! via sqlx for deployments and SQLite via rusqlite for local runs and tests.

mod backend;
pub mod error;
mod filter_sql;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
pub mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use types::{PaginatedResult, StorageStats};
