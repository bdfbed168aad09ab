//! Core types for salary-survey
//!
//! Domain records, query filters, configuration and the field-normalization
//! rules shared by the importer and the query service.

pub mod constants;
pub mod env_config;
mod error;
pub mod json_utils;
pub mod normalize;
mod survey;

pub use constants::*;
pub use env_config::{DbConfig, env_parse_with_default, sqlite_pool_size};
pub use error::*;
pub use survey::*;
