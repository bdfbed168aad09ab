//! Shared constants for salary-survey.

/// Maximum number of rows any list query may return.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default page size for list queries when the caller gives none.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Number of pay-range buckets returned by the summary query.
pub const PAY_RANGE_SUMMARY_LIMIT: usize = 3;

/// Value assigned to the literal "startup" company size (midpoint of 10-15).
pub const STARTUP_COMPANY_SIZE: f64 = 12.5;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default SQLite connection pool size.
pub const SQLITE_POOL_SIZE: u32 = 8;
