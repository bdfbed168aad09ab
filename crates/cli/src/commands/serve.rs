use anyhow::Result;
use salary_survey_http::{AppState, create_router};
use salary_survey_service::SurveyService;
use std::path::Path;
use std::sync::Arc;

use crate::open_storage;

pub(crate) async fn run(sqlite: Option<&Path>, port: u16, host: String) -> Result<()> {
    let storage = open_storage(sqlite).await?;
    let state = Arc::new(AppState { survey_service: Arc::new(SurveyService::new(storage)) });

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
