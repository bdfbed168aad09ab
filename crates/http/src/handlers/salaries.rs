use axum::{
    Json,
    extract::{Query, State},
    http::HeaderName,
};
use std::sync::Arc;

use salary_survey_core::{PayRangeCount, SalarySurvey};
use salary_survey_storage::StorageStats;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{PageQuery, SurveyQuery};

pub async fn pay_range_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SurveyQuery>,
) -> Result<Json<Vec<PayRangeCount>>, ApiError> {
    let filter = query.to_filter()?;
    let summary = state.survey_service.pay_range_summary(filter).await?;
    Ok(Json(summary))
}

/// Total matches before paging, sent alongside the page array.
pub const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Filtered records as a bare JSON array; the unpaged total rides in
/// `X-Total-Count`.
pub async fn list_salaries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SurveyQuery>,
    Query(page): Query<PageQuery>,
) -> Result<([(HeaderName, String); 1], Json<Vec<SalarySurvey>>), ApiError> {
    let filter = query.to_filter()?;
    let result = state.survey_service.list_surveys(filter, page.offset()?, page.limit()?).await?;
    Ok(([(TOTAL_COUNT_HEADER, result.total.to_string())], Json(result.items)))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StorageStats>, ApiError> {
    Ok(Json(state.survey_service.stats().await?))
}
