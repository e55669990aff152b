//! RFID Fare Gate Library
//! # Overview
//!
//! This library charges RFID tags presented at a serial-connected reader. Each
//! scan is checked against a per-tag balance, charged a fixed fee, logged to a
//! local CSV file, and reported to a remote spreadsheet endpoint over HTTP.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (scan outcomes, errors)
//! - [`cli`] - CLI arguments and environment configuration
//! - [`core`] - Business logic components:
//!   - [`core::balance_book`] - In-memory balances with checked credit/debit
//!   - [`core::gate`] - Grant/deny decision and fee deduction
//!   - [`core::debounce`] - Per-tag cooldown for repeated reads
//! - [`io`] - Balance, recharge, and transaction log files
//! - [`serial`] - Tag lines from the reader's serial port
//! - [`notify`] - HTTP notification of scan outcomes
//! - [`station`] - The scan loop tying everything together
//!
//! # Scan Rules
//!
//! - A known tag with a positive balance is charged the fee: **Paid / Granted**
//! - Any other tag is left untouched: **Insufficient Balance / Denied**
//! - Recharges only apply to tags that already have a balance record
//!
//! # Files
//!
//! - Balance file: `tag,balance` rows, rewritten after every change
//! - Recharge file: `tag,amount` rows, emptied after every pass
//! - Log file: `timestamp,tag,balance|N/A,status,access` rows, append-only

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod notify;
pub mod serial;
pub mod station;
pub mod types;

pub use core::{BalanceBook, Debouncer, Gate, NotifyStatus, Notifier, TagSource};
pub use io::{apply_recharges, load_balances, save_balances, TransactionLog};
pub use station::{ScanLoop, StationConfig};
pub use types::{Access, Balance, LedgerError, ScanOutcome, Status, TagId};
