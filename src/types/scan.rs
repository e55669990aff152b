//! Scan-related types for the RFID fare gate
//!
//! This module defines tag identifiers, balances, and the outcome of a single
//! tag presentation at the reader.

use std::fmt;

/// Tag identifier
///
/// Opaque string broadcast by an RFID credential. Equality is exact string match.
pub type TagId = String;

/// Credit units associated with a tag
///
/// Signed because a granted scan always deducts the full fee, which can take
/// a small positive balance below zero.
pub type Balance = i64;

/// Payment status reported for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The fee was deducted
    Paid,

    /// The tag is unknown or its balance is not positive
    InsufficientBalance,
}

impl Status {
    /// Wire representation used in the log file and the remote query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Paid => "Paid",
            Status::InsufficientBalance => "Insufficient Balance",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access decision derived from balance sufficiency at scan time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

impl Access {
    /// Wire representation used in the log file and the remote query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Granted => "Granted",
            Access::Denied => "Denied",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one tag presentation
///
/// `balance` is `None` when the tag has no balance record at all; it is
/// rendered as `N/A` in the log and in the remote notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The tag that was presented
    pub tag: TagId,

    /// Balance after the decision, if the tag is known
    pub balance: Option<Balance>,

    /// Payment status
    pub status: Status,

    /// Access decision
    pub access: Access,
}

/// Placeholder written in place of a balance for unknown tags
pub const UNKNOWN_BALANCE: &str = "N/A";

impl ScanOutcome {
    /// Render the resulting balance, or `N/A` for unknown tags
    pub fn balance_text(&self) -> String {
        match self.balance {
            Some(balance) => balance.to_string(),
            None => UNKNOWN_BALANCE.to_string(),
        }
    }
}
