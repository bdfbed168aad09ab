//! Storage backend trait abstraction
//!
//! Async domain traits implemented by both the PostgreSQL and the SQLite
//! backends.

pub mod stats;
pub mod survey;

pub use stats::StatsStore;
pub use survey::SurveyStore;
