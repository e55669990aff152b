//! Remote notification module
//!
//! - `sheets` - HTTP GET notifier for the spreadsheet endpoint

pub mod sheets;

pub use sheets::SheetsNotifier;
