use anyhow::Result;
use salary_survey_core::SurveyFilter;
use salary_survey_service::SurveyService;
use std::path::Path;

use crate::open_storage;

async fn service(sqlite: Option<&Path>) -> Result<SurveyService> {
    Ok(SurveyService::new(open_storage(sqlite).await?))
}

pub(crate) async fn run_summary(sqlite: Option<&Path>, filter: SurveyFilter) -> Result<()> {
    let summary = service(sqlite).await?.pay_range_summary(filter).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub(crate) async fn run_list(
    sqlite: Option<&Path>,
    filter: SurveyFilter,
    offset: usize,
    limit: usize,
) -> Result<()> {
    let page = service(sqlite).await?.list_surveys(filter, offset, limit).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

pub(crate) async fn run_stats(sqlite: Option<&Path>) -> Result<()> {
    let stats = service(sqlite).await?.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
