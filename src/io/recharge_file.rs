//! Recharge file processing
//!
//! Pending top-ups are queued by an external process as `tag,amount` rows.
//! Each pass reads every row, credits the tags that already have a balance
//! record, and truncates the file.
//!
//! # Unknown Tags
//!
//! A recharge for a tag that is not in the balance book is dropped. It does
//! not provision a new record: tags must be added to the balance file before
//! they can be recharged.
//!
//! # Failure Behavior
//!
//! The whole file is parsed before any credit is applied. A malformed amount
//! aborts the pass with the book untouched and the file left in place.

use crate::core::BalanceBook;
use crate::io::csv_format::read_amount_rows;
use crate::types::{Balance, LedgerError, TagId};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// A recharge that was credited to a known tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRecharge {
    pub tag: TagId,
    pub amount: Balance,
    pub new_balance: Balance,
}

/// Apply every pending recharge in `path` to `book`, then empty the file
///
/// # Returns
///
/// * `Ok(Vec<AppliedRecharge>)` - The recharges credited, in file order
///   (empty when the file is missing, empty, or names only unknown tags)
/// * `Err(LedgerError)` - If the file cannot be read or truncated, a row is
///   malformed, or a credit would overflow
pub fn apply_recharges(
    path: &Path,
    book: &mut BalanceBook,
) -> Result<Vec<AppliedRecharge>, LedgerError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let rows = read_amount_rows(BufReader::new(file))?;

    let mut applied = Vec::new();
    for row in rows {
        match book.credit(&row.tag, row.amount)? {
            Some(new_balance) => {
                log::info!(
                    "{} recharged with {}. New balance: {}",
                    row.tag,
                    row.amount,
                    new_balance
                );
                applied.push(AppliedRecharge {
                    tag: row.tag,
                    amount: row.amount,
                    new_balance,
                });
            }
            None => {
                log::debug!(
                    "Dropping recharge of {} for unknown tag {}",
                    row.amount,
                    row.tag
                );
            }
        }
    }

    truncate(path)?;
    Ok(applied)
}

fn truncate(path: &Path) -> Result<(), LedgerError> {
    OpenOptions::new().write(true).truncate(true).open(path)?;
    Ok(())
}
