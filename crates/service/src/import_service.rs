use std::path::Path;
use std::sync::Arc;

use salary_survey_core::NewSalarySurvey;
use salary_survey_core::normalize::{HeaderMap, normalize_row};
use salary_survey_storage::StorageBackend;
use salary_survey_storage::traits::SurveyStore;
use serde::Serialize;

use crate::{CsvSource, CsvTable, ServiceError};

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub rows_read: usize,
    pub rows_committed: u64,
}

/// Loads a survey export into storage: read, normalize, insert in one
/// transaction.
pub struct ImportService {
    storage: Arc<StorageBackend>,
    source: CsvSource,
}

impl ImportService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage, source: CsvSource::new() }
    }

    #[must_use]
    pub fn with_source(mut self, source: CsvSource) -> Self {
        self.source = source;
        self
    }

    /// Import a CSV file. Re-importing the same file appends the rows again.
    pub async fn import_csv(&self, path: &Path) -> Result<ImportReport, ServiceError> {
        tracing::info!(path = %path.display(), "reading survey export");
        let table = self.source.read(path)?;
        self.import_table(&table).await
    }

    /// Normalize and persist an already-read table.
    pub async fn import_table(&self, table: &CsvTable) -> Result<ImportReport, ServiceError> {
        let headers = HeaderMap::from_headers(&table.headers);
        if !headers.dropped().is_empty() {
            tracing::info!(dropped = ?headers.dropped(), "ignoring unknown source columns");
        }
        let missing = headers.missing();
        if !missing.is_empty() {
            tracing::warn!(?missing, "source has no column for these fields, storing null");
        }

        let records: Vec<NewSalarySurvey> =
            table.rows.iter().map(|row| normalize_row(&headers, row.as_slice())).collect();
        let rows_read = records.len();
        tracing::info!(rows_read, "survey rows normalized");

        if records.is_empty() {
            return Ok(ImportReport { rows_read, rows_committed: 0 });
        }

        let rows_committed = self.storage.insert_batch(&records).await.map_err(|source| {
            tracing::error!(attempted = rows_read, error = %source, "bulk write rolled back");
            ServiceError::BulkWrite { attempted: rows_read, source }
        })?;
        tracing::info!(rows_read, rows_committed, "survey import committed");
        Ok(ImportReport { rows_read, rows_committed })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code")]

    use std::io::Write;

    use salary_survey_core::SurveyFilter;
    use salary_survey_storage::traits::StatsStore;
    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "Zaman damgası,Kendinizi ne olarak tanımlarsınız?,Şirket  kadar büyük?,\
                          Tecrübe yılınız ?,Maaşınızın para birimi?,Maaş aralığınız?,Göreviniz nedir?";

    fn setup() -> (ImportService, Arc<StorageBackend>, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(StorageBackend::new_sqlite(&dir.path().join("survey.db")).unwrap());
        (ImportService::new(Arc::clone(&storage)), storage, dir)
    }

    fn write_csv(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("survey.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    const FIVE_ROWS: &str = "\
28.07.2022 19:09:31,Backend Developer,10-20,3-5,₺ - Türk Lirası TRY,20.000 - 30.000,Backend
28.07.2022 19:10:02,Frontend Developer,Startup,1,₺ - Türk Lirası TRY,10.000 - 20.000,Frontend
28.07.2022 19:11:45,Data Analyst,5,Dinazor,$ - Dolar USD,10.000 - 20.000,Data
not a date,  ,big company,,,,
,QA,,10,,,
";

    #[tokio::test]
    async fn test_import_normalizes_company_size() {
        let (service, storage, dir) = setup();
        let path = write_csv(&dir, FIVE_ROWS);

        let report = service.import_csv(&path).await.unwrap();
        assert_eq!(report, ImportReport { rows_read: 5, rows_committed: 5 });

        let page = storage.list_surveys(&SurveyFilter::default(), 0, 10).await.unwrap();
        let sizes: Vec<_> = page.items.iter().map(|s| s.company_size).collect();
        assert_eq!(sizes, vec![Some(15.0), Some(12.5), Some(5.0), None, None]);

        let first = &page.items[0];
        assert_eq!(first.title.as_deref(), Some("Backend Developer"));
        assert_eq!(first.experience, Some(4.0));
        assert!(first.date.is_some());
        assert_eq!(page.items[2].experience, None);
        assert_eq!(page.items[3].title, None);
        assert_eq!(page.items[3].date, None);
        assert_eq!(page.items[4].experience, Some(10.0));
        // Columns absent from the source stay null.
        assert!(page.items.iter().all(|s| s.area.is_none()));
    }

    #[tokio::test]
    async fn test_import_twice_duplicates_rows() {
        let (service, storage, dir) = setup();
        let path = write_csv(&dir, FIVE_ROWS);
        service.import_csv(&path).await.unwrap();
        service.import_csv(&path).await.unwrap();
        assert_eq!(storage.get_stats().await.unwrap().survey_count, 10);
    }

    #[tokio::test]
    async fn test_header_only_writes_nothing() {
        let (service, storage, dir) = setup();
        let path = write_csv(&dir, "");
        let report = service.import_csv(&path).await.unwrap();
        assert_eq!(report, ImportReport { rows_read: 0, rows_committed: 0 });
        assert_eq!(storage.get_stats().await.unwrap().survey_count, 0);
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_write() {
        let (service, storage, dir) = setup();
        let err = service.import_csv(&dir.path().join("absent.csv")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Read { .. }));
        assert_eq!(storage.get_stats().await.unwrap().survey_count, 0);
    }

    #[tokio::test]
    async fn test_failed_bulk_write_rolls_back() {
        let (service, storage, dir) = setup();
        let conn = rusqlite::Connection::open(dir.path().join("survey.db")).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER reject_qa BEFORE INSERT ON salary_survey
             WHEN NEW.title = 'QA'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();
        drop(conn);

        let path = write_csv(&dir, FIVE_ROWS);
        let err = service.import_csv(&path).await.unwrap_err();
        match &err {
            ServiceError::BulkWrite { attempted, source } => {
                assert_eq!(*attempted, 5);
                assert!(source.is_constraint_violation());
            },
            other => panic!("expected BulkWrite, got {other:?}"),
        }
        assert!(err.to_string().contains("attempted 5 rows, committed 0"));
        assert_eq!(storage.get_stats().await.unwrap().survey_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_columns_are_ignored() {
        let (service, storage, _dir) = setup();
        let table = CsvTable {
            headers: vec!["Extra".to_owned(), "Maaş aralığınız?".to_owned()],
            rows: vec![vec!["ignored".to_owned(), " 10.000 - 20.000 ".to_owned()]],
        };
        service.import_table(&table).await.unwrap();
        let page = storage.list_surveys(&SurveyFilter::default(), 0, 10).await.unwrap();
        assert_eq!(page.items[0].pay_range.as_deref(), Some("10.000 - 20.000"));
    }
}
