//! Raw CSV reading for survey exports.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::ServiceError;

/// Header row plus every data row, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// CSV reader settings.
#[derive(Debug, Clone, Copy)]
pub struct CsvSource {
    delimiter: u8,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a whole file. Rows may be ragged; short rows simply have fewer
    /// cells.
    pub fn read(&self, path: &Path) -> Result<CsvTable, ServiceError> {
        let wrap = |source| ServiceError::Read { path: path.to_path_buf(), source };
        let reader = self.builder().from_path(path).map_err(wrap)?;
        Self::collect(reader).map_err(wrap)
    }

    /// Read from any byte source. `label` names the source in errors.
    pub fn read_from<R: Read>(&self, input: R, label: &str) -> Result<CsvTable, ServiceError> {
        Self::collect(self.builder().from_reader(input))
            .map_err(|source| ServiceError::Read { path: label.into(), source })
    }

    fn builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder.delimiter(self.delimiter).has_headers(true).flexible(true);
        builder
    }

    fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<CsvTable, csv::Error> {
        let headers = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h }.to_owned())
            .collect();
        let mut rows = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            rows.push(record.iter().map(ToOwned::to_owned).collect());
        }
        Ok(CsvTable { headers, rows })
    }
}
