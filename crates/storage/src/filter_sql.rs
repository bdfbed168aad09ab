//! Backend-neutral translation of `SurveyFilter` into SQL conditions.
//!
//! Each backend renders placeholders its own way (`$n` vs `?n`) and picks its
//! case-insensitive text match; the column list, operators and bound values
//! are decided here once.

use salary_survey_core::SurveyFilter;

/// Columns selected for a full record, in `row_to_survey` order.
pub(crate) const SURVEY_COLUMNS: &str = "id, date, title, company_size, accoms, experience, \
     currency, pay_range, area, company_origin, work_style, work_area";

/// Columns written on insert (everything but `id`).
pub(crate) const INSERT_COLUMNS: &str = "date, title, company_size, accoms, experience, \
     currency, pay_range, area, company_origin, work_style, work_area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchOp {
    /// Case-insensitive substring.
    Contains,
    /// Case-insensitive suffix.
    EndsWith,
    /// Inclusive lower bound.
    AtLeast,
    /// Inclusive upper bound.
    AtMost,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterValue {
    Text(String),
    Real(f64),
}

/// How a backend compares text case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextMatch {
    /// `col ILIKE pattern`
    Ilike,
    /// `f(col) LIKE f(pattern)` with a lowercasing SQL function `f`.
    FoldedLike(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Condition {
    pub column: &'static str,
    pub op: MatchOp,
    pub value: FilterValue,
}

impl Condition {
    fn text(column: &'static str, op: MatchOp, raw: &str) -> Self {
        let escaped = escape_like(raw);
        let pattern = match op {
            MatchOp::EndsWith => format!("%{escaped}"),
            _ => format!("%{escaped}%"),
        };
        Self { column, op, value: FilterValue::Text(pattern) }
    }

    fn real(column: &'static str, op: MatchOp, bound: f64) -> Self {
        Self { column, op, value: FilterValue::Real(bound) }
    }

    /// SQL for this condition, with `placeholder` standing in for the bound
    /// value.
    pub fn render(&self, text_match: TextMatch, placeholder: &str) -> String {
        match (self.op, text_match) {
            (MatchOp::Contains | MatchOp::EndsWith, TextMatch::Ilike) => {
                format!("{} ILIKE {placeholder} ESCAPE '\\'", self.column)
            },
            (MatchOp::Contains | MatchOp::EndsWith, TextMatch::FoldedLike(f)) => {
                format!("{f}({}) LIKE {f}({placeholder}) ESCAPE '\\'", self.column)
            },
            (MatchOp::AtLeast, _) => format!("{} >= {placeholder}", self.column),
            (MatchOp::AtMost, _) => format!("{} <= {placeholder}", self.column),
        }
    }
}

/// Conditions for every supplied filter, in a stable order.
pub(crate) fn conditions(filter: &SurveyFilter) -> Vec<Condition> {
    let mut out = Vec::new();
    if let Some(title) = &filter.title {
        out.push(Condition::text("title", MatchOp::Contains, title));
    }
    if let Some(v) = filter.min_company_size {
        out.push(Condition::real("company_size", MatchOp::AtLeast, v));
    }
    if let Some(v) = filter.max_company_size {
        out.push(Condition::real("company_size", MatchOp::AtMost, v));
    }
    if let Some(v) = filter.min_experience {
        out.push(Condition::real("experience", MatchOp::AtLeast, v));
    }
    if let Some(v) = filter.max_experience {
        out.push(Condition::real("experience", MatchOp::AtMost, v));
    }
    if let Some(area) = &filter.area {
        out.push(Condition::text("area", MatchOp::Contains, area));
    }
    if let Some(work_area) = &filter.work_area {
        out.push(Condition::text("work_area", MatchOp::Contains, work_area));
    }
    if let Some(currency) = &filter.currency {
        out.push(Condition::text("currency", MatchOp::EndsWith, currency));
    }
    out
}

/// ` WHERE a AND b ...` for `conds`, or an empty string when there are none.
/// `placeholder` receives the 1-based bind position.
pub(crate) fn where_clause(
    conds: &[Condition],
    text_match: TextMatch,
    placeholder: impl Fn(usize) -> String,
) -> String {
    if conds.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = conds
        .iter()
        .enumerate()
        .map(|(i, c)| c.render(text_match, &placeholder(i + 1)))
        .collect();
    format!(" WHERE {}", parts.join(" AND "))
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Convert `usize` to `i64` for SQL LIMIT/OFFSET binds.
/// Saturates to `i64::MAX` on overflow.
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}
