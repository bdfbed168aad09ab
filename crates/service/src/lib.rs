//! Service layer for salary-survey
//!
//! Centralizes business logic between the HTTP/CLI front ends and storage:
//! importing survey exports and answering filtered queries.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod csv_source;
mod error;
mod import_service;
mod survey_service;

pub use csv_source::{CsvSource, CsvTable};
pub use error::ServiceError;
pub use import_service::{ImportReport, ImportService};
pub use survey_service::SurveyService;
