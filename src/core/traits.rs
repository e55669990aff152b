//! Core traits for the collaborators of the scan loop
//!
//! This module defines the seams between the scan loop and the outside world:
//! where tag lines come from and where scan outcomes are reported. The serial
//! reader and the HTTP notifier implement them in production; tests plug in
//! scripted sources and recording notifiers.

use crate::types::{LedgerError, ScanOutcome, TagId};

/// Source of tag lines
///
/// Implementations block for at most their configured timeout.
pub trait TagSource {
    /// Wait for the next tag line
    ///
    /// Returns `Ok(Some(tag))` with surrounding whitespace stripped,
    /// `Ok(None)` when no complete line arrived before the timeout, and an
    /// error when the link fails or the line cannot be decoded.
    fn next_tag(&mut self) -> Result<Option<TagId>, LedgerError>;
}

/// Result of a delivered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyStatus {
    /// The endpoint answered HTTP 200
    Delivered {
        /// Response body
        body: String,
    },

    /// The endpoint answered with any other status
    Rejected {
        /// HTTP status code
        code: u16,
    },
}

/// Sink for scan outcomes
pub trait Notifier {
    /// Report a scan outcome
    ///
    /// A rejection by the endpoint is not an error; only a failure to reach
    /// it is.
    fn notify(&mut self, outcome: &ScanOutcome) -> Result<NotifyStatus, LedgerError>;
}
