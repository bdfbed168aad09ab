//! HTTP API server for salary-survey.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod api_types;
mod handlers;
mod query_types;

use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use salary_survey_service::SurveyService;

pub use api_types::VersionResponse;

/// Shared application state for all HTTP handlers.
///
/// Holds only `Arc`-shared services; wrapped in `Arc` itself for sharing
/// across handlers.
pub struct AppState {
    /// Read-side survey queries
    pub survey_service: Arc<SurveyService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/stats", get(handlers::salaries::get_stats))
        .route("/salaries", get(handlers::salaries::list_salaries))
        .route("/salaries/pay_range_summary", get(handlers::salaries::pay_range_summary))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
