//! Salary survey domain types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::json_utils::finite_f64;

/// A persisted, normalized survey response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalarySurvey {
    pub id: i64,
    pub date: Option<NaiveDateTime>,
    pub title: Option<String>,
    #[serde(serialize_with = "finite_f64::serialize")]
    pub company_size: Option<f64>,
    pub accoms: Option<String>,
    #[serde(serialize_with = "finite_f64::serialize")]
    pub experience: Option<f64>,
    pub currency: Option<String>,
    pub pay_range: Option<String>,
    pub area: Option<String>,
    pub company_origin: Option<String>,
    pub work_style: Option<String>,
    pub work_area: Option<String>,
}

/// A normalized survey response that has not been stored yet.
///
/// Storage assigns the `id` on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSalarySurvey {
    pub date: Option<NaiveDateTime>,
    pub title: Option<String>,
    #[serde(serialize_with = "finite_f64::serialize")]
    pub company_size: Option<f64>,
    pub accoms: Option<String>,
    #[serde(serialize_with = "finite_f64::serialize")]
    pub experience: Option<f64>,
    pub currency: Option<String>,
    pub pay_range: Option<String>,
    pub area: Option<String>,
    pub company_origin: Option<String>,
    pub work_style: Option<String>,
    pub work_area: Option<String>,
}

impl NewSalarySurvey {
    #[must_use]
    pub fn with_id(self, id: i64) -> SalarySurvey {
        SalarySurvey {
            id,
            date: self.date,
            title: self.title,
            company_size: self.company_size,
            accoms: self.accoms,
            experience: self.experience,
            currency: self.currency,
            pay_range: self.pay_range,
            area: self.area,
            company_origin: self.company_origin,
            work_style: self.work_style,
            work_area: self.work_area,
        }
    }
}

/// One bucket of the pay-range summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRangeCount {
    pub pay_range: Option<String>,
    pub count: i64,
}

/// Optional filters shared by the summary and list queries. All supplied
/// filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyFilter {
    /// Case-insensitive substring of `title`.
    pub title: Option<String>,
    pub min_company_size: Option<f64>,
    pub max_company_size: Option<f64>,
    pub min_experience: Option<f64>,
    pub max_experience: Option<f64>,
    /// Case-insensitive substring of `area`.
    pub area: Option<String>,
    /// Case-insensitive substring of `work_area`.
    pub work_area: Option<String>,
    /// Case-insensitive suffix of `currency`.
    pub currency: Option<String>,
}

impl SurveyFilter {
    /// Drop blank text filters so `?title=` behaves like no filter at all.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn blank_to_none(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
        }
        Self {
            title: blank_to_none(self.title),
            area: blank_to_none(self.area),
            work_area: blank_to_none(self.work_area),
            currency: blank_to_none(self.currency),
            ..self
        }
    }

    /// Reject non-finite range bounds.
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("min_company_size", self.min_company_size),
            ("max_company_size", self.max_company_size),
            ("min_experience", self.min_experience),
            ("max_experience", self.max_experience),
        ];
        for (name, bound) in bounds {
            if bound.is_some_and(|v| !v.is_finite()) {
                return Err(SurveyError::InvalidInput(format!("{name} must be a finite number")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// In-memory evaluation of the filter. Text fields compare under Unicode
    /// lowercasing, as the `SQLite` backend's `ulower` function does.
    #[must_use]
    pub fn matches(&self, survey: &SalarySurvey) -> bool {
        contains_ci(survey.title.as_deref(), self.title.as_deref())
            && contains_ci(survey.area.as_deref(), self.area.as_deref())
            && contains_ci(survey.work_area.as_deref(), self.work_area.as_deref())
            && ends_with_ci(survey.currency.as_deref(), self.currency.as_deref())
            && in_range(survey.company_size, self.min_company_size, self.max_company_size)
            && in_range(survey.experience, self.min_experience, self.max_experience)
    }
}

fn contains_ci(value: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => value.is_some_and(|v| v.to_lowercase().contains(&n.to_lowercase())),
    }
}

fn ends_with_ci(value: Option<&str>, suffix: Option<&str>) -> bool {
    match suffix {
        None => true,
        Some(s) => value.is_some_and(|v| v.to_lowercase().ends_with(&s.to_lowercase())),
    }
}

fn in_range(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    value.is_some_and(|v| min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(title: &str, currency: &str, experience: Option<f64>) -> SalarySurvey {
        NewSalarySurvey {
            title: Some(title.to_owned()),
            currency: Some(currency.to_owned()),
            experience,
            ..NewSalarySurvey::default()
        }
        .with_id(1)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = SurveyFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&NewSalarySurvey::default().with_id(7)));
    }

    #[test]
    fn test_title_is_case_insensitive_substring() {
        let filter = SurveyFilter { title: Some("backend".to_owned()), ..SurveyFilter::default() };
        assert!(filter.matches(&survey("Senior Backend Developer", "TRY", None)));
        assert!(!filter.matches(&survey("Frontend Developer", "TRY", None)));
    }

    #[test]
    fn test_currency_is_suffix_match() {
        let filter = SurveyFilter { currency: Some("usd".to_owned()), ..SurveyFilter::default() };
        assert!(filter.matches(&survey("Dev", "$ USD", None)));
        assert!(!filter.matches(&survey("Dev", "USD (remote)", None)));
    }

    #[test]
    fn test_range_is_inclusive_and_excludes_null() {
        let filter = SurveyFilter {
            min_experience: Some(3.0),
            max_experience: Some(7.0),
            ..SurveyFilter::default()
        };
        assert!(filter.matches(&survey("Dev", "TRY", Some(3.0))));
        assert!(filter.matches(&survey("Dev", "TRY", Some(7.0))));
        assert!(!filter.matches(&survey("Dev", "TRY", Some(8.0))));
        assert!(!filter.matches(&survey("Dev", "TRY", None)));
    }

    #[test]
    fn test_normalized_drops_blank_text() {
        let filter = SurveyFilter {
            title: Some("  ".to_owned()),
            area: Some(" Fintech ".to_owned()),
            ..SurveyFilter::default()
        }
        .normalized();
        assert_eq!(filter.title, None);
        assert_eq!(filter.area.as_deref(), Some("Fintech"));
    }

    #[test]
    fn test_validate_rejects_nan_bounds() {
        let filter = SurveyFilter { min_experience: Some(f64::NAN), ..SurveyFilter::default() };
        assert!(filter.validate().is_err());
        assert!(SurveyFilter::default().validate().is_ok());
    }

    #[test]
    fn test_non_finite_floats_serialize_as_null() {
        let record = NewSalarySurvey { company_size: Some(f64::NAN), ..NewSalarySurvey::default() }
            .with_id(3);
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert!(json["company_size"].is_null());
        assert_eq!(json["id"], 3);
    }
}
