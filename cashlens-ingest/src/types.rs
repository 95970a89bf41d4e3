use std::io::Read;
use std::path::Path;

use cashlens_core::Transaction;

use crate::error::{IngestError, Result};

/// One statement file read as named text columns.
///
/// No physical column order is assumed; schema detection works from `headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatement {
    /// Origin label (usually the file path) used in errors and on each transaction
    pub origin: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawStatement {
    pub fn new(origin: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            origin: origin.into(),
            headers,
            rows,
        }
    }

    /// Read a CSV with a header row. Ragged rows are accepted.
    pub fn from_reader<R: Read>(origin: impl Into<String>, reader: R) -> Result<Self> {
        let origin = origin.into();
        let csv_err = |source| IngestError::Csv {
            origin: origin.clone(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(csv_err)?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Self {
            origin,
            headers,
            rows,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IngestError::MissingFile(path.to_path_buf()));
        }
        let origin = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| IngestError::Csv {
            origin: origin.clone(),
            source: csv::Error::from(e),
        })?;
        Self::from_reader(origin, file)
    }
}

/// Output of normalizing one statement
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStatement {
    pub origin: String,
    pub transactions: Vec<Transaction>,
    /// Rows discarded because their date could not be parsed
    pub dropped_rows: usize,
}
