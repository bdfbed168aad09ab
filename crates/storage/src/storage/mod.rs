//! `SQLite` storage implementation.
//!
//! All methods are synchronous; `sqlite_async` adapts them to the async
//! store traits via `spawn_blocking`.

mod stats;
mod surveys;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use salary_survey_core::{SalarySurvey, sqlite_pool_size};

use crate::error::StorageError;
use crate::filter_sql::{Condition, FilterValue, TextMatch, where_clause};
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool. The connection goes back to the pool when
/// the guard drops, on success and error paths alike.
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Unicode lowercase, registered on every pooled connection. SQLite's own
/// `lower()` and `LIKE` fold ASCII only.
pub(crate) const LOWER_FN: &str = "ulower";

pub(crate) fn sqlite_where(conds: &[Condition]) -> String {
    where_clause(conds, TextMatch::FoldedLike(LOWER_FN), |i| format!("?{i}"))
}

/// Bound values for `conds`, in placeholder order.
pub(crate) fn condition_values(conds: &[Condition]) -> Vec<Value> {
    conds
        .iter()
        .map(|c| match &c.value {
            FilterValue::Text(s) => Value::Text(s.clone()),
            FilterValue::Real(v) => Value::Real(*v),
        })
        .collect()
}

/// Map a `SURVEY_COLUMNS` row to `SalarySurvey`.
pub(crate) fn map_survey(row: &rusqlite::Row<'_>) -> rusqlite::Result<SalarySurvey> {
    Ok(SalarySurvey {
        id: row.get(0)?,
        date: row.get(1)?,
        title: row.get(2)?,
        company_size: row.get(3)?,
        accoms: row.get(4)?,
        experience: row.get(5)?,
        currency: row.get(6)?,
        pay_range: row.get(7)?,
        area: row.get(8)?,
        company_origin: row.get(9)?,
        work_style: row.get(10)?,
        work_area: row.get(11)?,
    })
}

/// Connection initializer for concurrency settings and the `ulower` function
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    conn.create_scalar_function(
        LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with `SQLite` connection pool
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = sqlite_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
        drop(conn);

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }
}
