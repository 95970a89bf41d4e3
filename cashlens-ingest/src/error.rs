//! Ingest error taxonomy.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Column concept that schema detection could not resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaConcept {
    Date,
    Amount,
}

impl fmt::Display for SchemaConcept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaConcept::Date => f.write_str("a date column"),
            SchemaConcept::Amount => f.write_str("amount, debit, or credit columns"),
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("[{origin}] Could not find {missing}. Columns were: {columns:?}")]
    Schema {
        origin: String,
        missing: SchemaConcept,
        columns: Vec<String>,
    },

    #[error("Expected exactly {expected} CSV files, got {got}.")]
    SourceCount { expected: usize, got: usize },

    #[error("CSV not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("[{origin}] CSV error: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_origin_and_columns() {
        let err = IngestError::Schema {
            origin: "bank.csv".to_string(),
            missing: SchemaConcept::Date,
            columns: vec!["Posted".to_string(), "Amount".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("[bank.csv]"));
        assert!(msg.contains("date column"));
        assert!(msg.contains("\"Posted\""));
    }
}
