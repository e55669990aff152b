//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `scan`: Tag identifiers, balances, and scan outcomes
//! - `error`: Error types for the fare gate

pub mod error;
pub mod scan;

pub use error::LedgerError;
pub use scan::{Access, Balance, ScanOutcome, Status, TagId, UNKNOWN_BALANCE};
