//! Load and normalize the statement files for one analysis run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cashlens_core::Transaction;
use cashlens_ingest::{normalize, IngestError, RawStatement};
use tracing::info;

use crate::config::AnalyzerConfig;

/// All transactions from a run's input files, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStatements {
    pub transactions: Vec<Transaction>,
    /// Rows dropped across all files because their date did not parse
    pub dropped_rows: usize,
}

/// Read, normalize and concatenate `paths`.
///
/// The file count must equal `config.expected_sources`, and every file must
/// exist before any of them is parsed. A schema failure in any file aborts the
/// whole load.
pub fn load_statements<P: AsRef<Path>>(paths: &[P], config: &AnalyzerConfig) -> Result<LoadedStatements> {
    if paths.len() != config.expected_sources {
        return Err(IngestError::SourceCount {
            expected: config.expected_sources,
            got: paths.len(),
        }
        .into());
    }

    let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_path_buf()).collect();
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(IngestError::MissingFile(missing.clone()).into());
    }

    let mut transactions = Vec::new();
    let mut dropped_rows = 0usize;

    for path in &paths {
        let raw = RawStatement::from_path(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let normalized = normalize(&raw).with_context(|| format!("normalizing {}", path.display()))?;

        info!(
            file = %path.display(),
            rows = raw.rows.len(),
            transactions = normalized.transactions.len(),
            dropped = normalized.dropped_rows,
            "loaded statement"
        );

        dropped_rows += normalized.dropped_rows;
        transactions.extend(normalized.transactions);
    }

    Ok(LoadedStatements {
        transactions,
        dropped_rows,
    })
}
