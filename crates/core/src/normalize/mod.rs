//! Field normalization for raw survey rows.
//!
//! Respondents type free text into numeric-ish fields ("16-25 kişi",
//! "3000 uzeri", "Startup"). These rules collapse that text into a single
//! representative number, or into nothing, without ever rejecting the row.

mod columns;

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::constants::STARTUP_COMPANY_SIZE;
use crate::survey::NewSalarySurvey;

pub use columns::{HeaderMap, SOURCE_COLUMNS, SurveyColumn, canonical_column};

// ASCII digits only: `f64::from_str` rejects other decimal scripts.
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"((?-u:\d)+\.?(?-u:\d)*)").expect("number pattern is valid")
});

static WHOLE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\d)+\.?(?-u:\d)*$").expect("whole number pattern is valid")
});

/// Day-first timestamp layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Trim a text cell; blank or missing becomes `None`.
#[must_use]
pub fn clean_string(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Collapse a free-text size/experience answer into one number.
///
/// - `"startup"` (any case) is 12.5.
/// - Text containing `-` is a range: the mean of every ASCII-digit number in it,
///   or `None` when it contains no number.
/// - Anything else must be a bare number, otherwise `None`.
///
/// A number that matches the pattern but does not parse is logged and
/// yields `None`.
#[must_use]
pub fn resolve_numeric_range(value: Option<&str>) -> Option<f64> {
    let raw = value?;
    let text = raw.trim().to_lowercase();

    if text == "startup" {
        return Some(STARTUP_COMPANY_SIZE);
    }

    if text.contains('-') {
        let mut total = 0.0;
        let mut count = 0_u32;
        for m in NUMBER_REGEX.find_iter(&text) {
            match parse_number(raw, m.as_str()) {
                Some(n) => {
                    total += n;
                    count += 1;
                },
                None => return None,
            }
        }
        if count == 0 {
            return None;
        }
        return Some(total / f64::from(count));
    }

    if WHOLE_NUMBER_REGEX.is_match(&text) {
        return parse_number(raw, &text);
    }
    None
}

fn parse_number(raw: &str, token: &str) -> Option<f64> {
    match token.parse::<f64>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!(value = %raw, token = %token, error = %e, "range conversion failed");
            None
        },
    }
}

/// Parse a day-first timestamp ("31.12.2023 14:05:09"). Unparseable input is `None`.
#[must_use]
pub fn parse_survey_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    tracing::debug!(value = %text, "unparseable survey date");
    None
}

/// Normalize one raw row. Each field is handled on its own; a bad field
/// becomes `None` and the rest of the row is kept.
#[must_use]
pub fn normalize_row<S: AsRef<str>>(headers: &HeaderMap, row: &[S]) -> NewSalarySurvey {
    let text = |column| clean_string(headers.cell(row, column));
    NewSalarySurvey {
        date: parse_survey_date(headers.cell(row, SurveyColumn::Date)),
        title: text(SurveyColumn::Title),
        company_size: resolve_numeric_range(headers.cell(row, SurveyColumn::CompanySize)),
        accoms: text(SurveyColumn::Accoms),
        experience: resolve_numeric_range(headers.cell(row, SurveyColumn::Experience)),
        currency: text(SurveyColumn::Currency),
        pay_range: text(SurveyColumn::PayRange),
        area: text(SurveyColumn::Area),
        company_origin: text(SurveyColumn::CompanyOrigin),
        work_style: text(SurveyColumn::WorkStyle),
        work_area: text(SurveyColumn::WorkArea),
    }
}
