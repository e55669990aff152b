//! Append-only transaction log
//!
//! Every processed scan, granted or denied, adds exactly one row. The file is
//! opened in append mode for each row and closed again; existing content is
//! never read, rotated, or truncated.

use crate::io::csv_format::{write_log_row, LogRow};
use crate::types::LedgerError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Handle to the transaction log file
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TransactionLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, creating the file if needed
    pub fn append(&self, row: &LogRow) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write_log_row(row, &mut file)
    }
}
