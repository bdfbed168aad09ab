//! Test utilities and module declarations for storage tests.

use crate::Storage;
use salary_survey_core::NewSalarySurvey;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_survey(title: &str, pay_range: Option<&str>) -> NewSalarySurvey {
    NewSalarySurvey {
        title: Some(title.to_owned()),
        company_size: Some(20.5),
        experience: Some(4.0),
        currency: Some("₺ - Türk Lirası TRY".to_owned()),
        pay_range: pay_range.map(ToOwned::to_owned),
        area: Some("Fintech".to_owned()),
        work_area: Some("Backend".to_owned()),
        ..NewSalarySurvey::default()
    }
}
