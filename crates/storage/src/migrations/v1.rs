//! Migration v1: Initial schema

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS salary_survey (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    title TEXT,
    company_size REAL,
    accoms TEXT,
    experience REAL,
    currency TEXT,
    pay_range TEXT,
    area TEXT,
    company_origin TEXT,
    work_style TEXT,
    work_area TEXT
);

CREATE INDEX IF NOT EXISTS idx_salary_survey_pay_range ON salary_survey(pay_range);
CREATE INDEX IF NOT EXISTS idx_salary_survey_experience ON salary_survey(experience);
CREATE INDEX IF NOT EXISTS idx_salary_survey_company_size ON salary_survey(company_size);
";
