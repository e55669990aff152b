//! CSV format handling for the balance, recharge, and log files
//!
//! This module centralizes all CSV format concerns, providing:
//! - `AmountRow` parsing for the two-column `tag,integer` files
//! - Balance book serialization
//! - `LogRow` structure for the transaction log
//!
//! All functions work on generic readers and writers (no path handling) for
//! easy testing. None of the files carry a header row.

use crate::core::BalanceBook;
use crate::types::{Balance, LedgerError, ScanOutcome, TagId};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use std::io::{Read, Write};

/// Timestamp layout of the first log column
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One `tag,integer` row from the balance or recharge file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountRow {
    pub tag: TagId,
    pub amount: Balance,
}

/// Convert a raw CSV record into an AmountRow
///
/// # Returns
///
/// * `Ok(Some(AmountRow))` - The record has exactly two fields and a valid integer
/// * `Ok(None)` - The record does not have exactly two fields and is skipped
/// * `Err(LedgerError)` - The second field is not an integer
pub fn convert_amount_record(record: &StringRecord) -> Result<Option<AmountRow>, LedgerError> {
    if record.len() != 2 {
        log::warn!(
            "Skipping row{} with {} field(s), expected 2",
            record
                .position()
                .map(|p| format!(" at line {}", p.line()))
                .unwrap_or_default(),
            record.len()
        );
        return Ok(None);
    }

    let amount = record[1].trim().parse::<Balance>().map_err(|_| {
        LedgerError::invalid_integer(&record[1], record.position().map(|p| p.line()))
    })?;

    Ok(Some(AmountRow {
        tag: record[0].to_string(),
        amount,
    }))
}

/// Read every `tag,integer` row from a reader
///
/// Rows with the wrong number of fields are skipped. The first malformed
/// integer aborts the read. Tags are taken verbatim so that whatever
/// `write_balances_csv` produced reads back unchanged; only the integer
/// column tolerates surrounding whitespace.
pub fn read_amount_rows<R: Read>(input: R) -> Result<Vec<AmountRow>, LedgerError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in reader.records() {
        if let Some(row) = convert_amount_record(&record?)? {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Write a balance book as `tag,balance` rows
///
/// Rows come out sorted by tag. No header is written.
pub fn write_balances_csv(book: &BalanceBook, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    for (tag, balance) in book.iter() {
        writer.write_record([tag, balance.to_string().as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// One row of the transaction log
///
/// Columns: timestamp, tag, balance (or `N/A`), status, access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    pub timestamp: String,
    pub tag: TagId,
    pub balance: String,
    pub status: String,
    pub access: String,
}

impl LogRow {
    /// Build a log row from a scan outcome and an already formatted timestamp
    pub fn from_outcome(timestamp: impl Into<String>, outcome: &ScanOutcome) -> Self {
        LogRow {
            timestamp: timestamp.into(),
            tag: outcome.tag.clone(),
            balance: outcome.balance_text(),
            status: outcome.status.to_string(),
            access: outcome.access.to_string(),
        }
    }
}

/// Write a single log row without a header
pub fn write_log_row(row: &LogRow, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}
