//! I/O module
//!
//! Handles the three flat files the gate works with.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, serialization)
//! - `balance_file` - Load and save the balance book
//! - `recharge_file` - Apply and clear pending recharges
//! - `transaction_log` - Append-only scan log

pub mod balance_file;
pub mod csv_format;
pub mod recharge_file;
pub mod transaction_log;

pub use balance_file::{load_balances, save_balances};
pub use csv_format::{read_amount_rows, AmountRow, LogRow, LOG_TIMESTAMP_FORMAT};
pub use recharge_file::{apply_recharges, AppliedRecharge};
pub use transaction_log::TransactionLog;
