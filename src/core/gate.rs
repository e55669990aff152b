//! Fare gate decision engine
//!
//! This module provides the `Gate` that turns a tag presentation into a
//! `ScanOutcome` by consulting and mutating the `BalanceBook`.
//!
//! The gate enforces a single business rule:
//! - A known tag with a balance above zero is charged the fee and granted
//! - Anything else (unknown tag, zero or negative balance) is denied and the
//!   book is left untouched
//!
//! The fee is always deducted in full, so a balance below the fee ends up
//! negative after the scan. Once a balance is at or below zero no further
//! deduction can happen until a recharge lifts it.

use crate::core::balance_book::BalanceBook;
use crate::types::{Access, Balance, LedgerError, ScanOutcome, Status};

/// Default fee deducted per granted scan
pub const DEFAULT_SCAN_FEE: Balance = 10;

/// Fare gate decision engine
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    fee: Balance,
}

impl Gate {
    /// Create a new Gate charging `fee` per granted scan
    pub fn new(fee: Balance) -> Self {
        Gate { fee }
    }

    /// The fee charged per granted scan
    pub fn fee(&self) -> Balance {
        self.fee
    }

    /// Decide the outcome of a single tag presentation
    ///
    /// # Arguments
    ///
    /// * `book` - The balance book to consult and debit
    /// * `tag` - The tag that was presented
    ///
    /// # Returns
    ///
    /// * `Ok(ScanOutcome)` - Granted with the debited balance, or denied with
    ///   the unchanged balance (`None` for unknown tags)
    /// * `Err(LedgerError)` - If the debit would underflow
    pub fn decide(&self, book: &mut BalanceBook, tag: &str) -> Result<ScanOutcome, LedgerError> {
        match book.get(tag) {
            Some(balance) if balance > 0 => {
                let balance = book.debit(tag, self.fee)?;
                Ok(ScanOutcome {
                    tag: tag.to_string(),
                    balance,
                    status: Status::Paid,
                    access: Access::Granted,
                })
            }
            balance => Ok(ScanOutcome {
                tag: tag.to_string(),
                balance,
                status: Status::InsufficientBalance,
                access: Access::Denied,
            }),
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_FEE)
    }
}
