//! Core business logic module
//!
//! This module contains the scan processing components:
//! - `traits` - Seams for the tag source and the remote notifier
//! - `balance_book` - In-memory balance state and credit/debit operations
//! - `gate` - Grant/deny decision and fee deduction
//! - `debounce` - Per-tag cooldown for repeated reads

pub mod balance_book;
pub mod debounce;
pub mod gate;
pub mod traits;

pub use balance_book::BalanceBook;
pub use debounce::{Debouncer, DEFAULT_COOLDOWN};
pub use gate::{Gate, DEFAULT_SCAN_FEE};
pub use traits::{NotifyStatus, Notifier, TagSource};
