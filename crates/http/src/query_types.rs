//! Request/query types (Deserialize)
//!
//! Every parameter arrives as text so that `?min_experience=` can mean "no
//! filter" while `?min_experience=abc` is a 400.

use salary_survey_core::{DEFAULT_QUERY_LIMIT, SurveyFilter};
use serde::Deserialize;

use crate::api_error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct SurveyQuery {
    pub title: Option<String>,
    pub min_company_size: Option<String>,
    pub max_company_size: Option<String>,
    pub min_experience: Option<String>,
    pub max_experience: Option<String>,
    pub area: Option<String>,
    pub work_area: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl SurveyQuery {
    pub fn to_filter(&self) -> Result<SurveyFilter, ApiError> {
        Ok(SurveyFilter {
            title: self.title.clone(),
            min_company_size: parse_param("min_company_size", self.min_company_size.as_deref())?,
            max_company_size: parse_param("max_company_size", self.max_company_size.as_deref())?,
            min_experience: parse_param("min_experience", self.min_experience.as_deref())?,
            max_experience: parse_param("max_experience", self.max_experience.as_deref())?,
            area: self.area.clone(),
            work_area: self.work_area.clone(),
            currency: self.currency.clone(),
        })
    }
}

impl PageQuery {
    pub fn offset(&self) -> Result<usize, ApiError> {
        Ok(parse_param("offset", self.offset.as_deref())?.unwrap_or(0))
    }

    pub fn limit(&self) -> Result<usize, ApiError> {
        Ok(parse_param("limit", self.limit.as_deref())?.unwrap_or(DEFAULT_QUERY_LIMIT))
    }
}

/// Blank is absent; anything else must parse.
fn parse_param<T: std::str::FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError> {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    text.parse()
        .map(Some)
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a number, got {text:?}")))
}
