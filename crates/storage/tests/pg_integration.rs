//! Integration tests for PgStorage.
//! Run with: DB_HOST=... cargo test -p salary-survey-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use chrono::Utc;
use salary_survey_core::{DbConfig, NewSalarySurvey, SurveyFilter};
use salary_survey_storage::PgStorage;
use salary_survey_storage::traits::{StatsStore, SurveyStore};

async fn create_pg_storage() -> PgStorage {
    let config = DbConfig::from_env();
    PgStorage::from_config(&config).await.expect("Failed to connect to PostgreSQL")
}

/// Title marker unique to one test run, so tests can share a database.
fn unique_marker() -> String {
    format!("pgtest-{}-{}", std::process::id(), Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn make_survey(marker: &str, pay_range: Option<&str>, experience: Option<f64>) -> NewSalarySurvey {
    NewSalarySurvey {
        date: Some(Utc::now().naive_utc()),
        title: Some(format!("{marker} Developer")),
        company_size: Some(20.5),
        experience,
        currency: Some("$ - Dolar USD".to_owned()),
        pay_range: pay_range.map(ToOwned::to_owned),
        ..NewSalarySurvey::default()
    }
}

fn marker_filter(marker: &str) -> SurveyFilter {
    SurveyFilter { title: Some(marker.to_owned()), ..SurveyFilter::default() }
}

#[tokio::test]
#[ignore]
async fn pg_insert_and_list() {
    let storage = create_pg_storage().await;
    let marker = unique_marker();
    let batch = vec![make_survey(&marker, Some("A"), Some(1.0)), make_survey(&marker, None, None)];

    assert_eq!(storage.insert_batch(&batch).await.unwrap(), 2);

    let page = storage.list_surveys(&marker_filter(&marker), 0, 10).await.unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].pay_range.as_deref(), Some("A"));
    assert_eq!(page.items[1].experience, None);
}

#[tokio::test]
#[ignore]
async fn pg_pay_range_summary() {
    let storage = create_pg_storage().await;
    let marker = unique_marker();
    let mut batch = Vec::new();
    for (range, n) in [("A", 1), ("B", 4), ("C", 2), ("D", 3)] {
        for _ in 0..n {
            batch.push(make_survey(&marker, Some(range), Some(5.0)));
        }
    }
    storage.insert_batch(&batch).await.unwrap();

    let summary = storage.pay_range_summary(&marker_filter(&marker), 3).await.unwrap();
    let got: Vec<_> = summary.iter().map(|b| (b.pay_range.clone().unwrap(), b.count)).collect();
    assert_eq!(got, vec![("B".to_owned(), 4), ("D".to_owned(), 3), ("C".to_owned(), 2)]);
}

#[tokio::test]
#[ignore]
async fn pg_experience_window_and_currency() {
    let storage = create_pg_storage().await;
    let marker = unique_marker();
    let batch: Vec<_> = [2.0, 4.0, 6.0, 8.0]
        .into_iter()
        .map(|e| make_survey(&marker, Some("X"), Some(e)))
        .collect();
    storage.insert_batch(&batch).await.unwrap();

    let filter = SurveyFilter {
        min_experience: Some(3.0),
        max_experience: Some(7.0),
        currency: Some("usd".to_owned()),
        ..marker_filter(&marker)
    };
    let summary = storage.pay_range_summary(&filter, 3).await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].count, 2);
}

#[tokio::test]
#[ignore]
async fn pg_stats() {
    let storage = create_pg_storage().await;
    let before = storage.get_stats().await.unwrap().survey_count;
    storage.insert_batch(&[make_survey(&unique_marker(), None, None)]).await.unwrap();
    let after = storage.get_stats().await.unwrap().survey_count;
    assert!(after > before);
}

#[tokio::test]
#[ignore]
async fn pg_failed_batch_rolls_back() {
    let storage = create_pg_storage().await;
    let marker = unique_marker();
    let bad_title = format!("{marker} rejected");
    let ident = marker.replace('-', "_");

    // Rejects only this run's bad row, so concurrent tests are unaffected.
    sqlx::query(&format!(
        "CREATE FUNCTION {ident}_reject() RETURNS trigger AS $$
         BEGIN
             IF NEW.title = '{bad_title}' THEN
                 RAISE EXCEPTION 'rejected row' USING ERRCODE = '23514';
             END IF;
             RETURN NEW;
         END;
         $$ LANGUAGE plpgsql"
    ))
    .execute(storage.pool())
    .await
    .unwrap();
    sqlx::query(&format!(
        "CREATE TRIGGER {ident}_trg BEFORE INSERT ON salary_survey
         FOR EACH ROW EXECUTE FUNCTION {ident}_reject()"
    ))
    .execute(storage.pool())
    .await
    .unwrap();

    // 1500 rows span two insert chunks; the bad row sits in the second.
    let mut batch: Vec<_> = (0..1500).map(|_| make_survey(&marker, Some("A"), Some(1.0))).collect();
    batch[1200].title = Some(bad_title);
    let result = storage.insert_batch(&batch).await;

    sqlx::query(&format!("DROP TRIGGER {ident}_trg ON salary_survey"))
        .execute(storage.pool())
        .await
        .unwrap();
    sqlx::query(&format!("DROP FUNCTION {ident}_reject()")).execute(storage.pool()).await.unwrap();

    let err = result.unwrap_err();
    assert!(err.is_constraint_violation(), "unexpected error: {err}");
    assert_eq!(storage.list_surveys(&marker_filter(&marker), 0, 1).await.unwrap().total, 0);
}
