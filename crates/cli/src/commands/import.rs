use anyhow::Result;
use salary_survey_service::{CsvSource, ImportService};
use std::path::Path;

use crate::open_storage;

pub(crate) async fn run(sqlite: Option<&Path>, csv: &Path, delimiter: u8) -> Result<()> {
    let storage = open_storage(sqlite).await?;
    let report = ImportService::new(storage)
        .with_source(CsvSource::new().with_delimiter(delimiter))
        .import_csv(csv)
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
