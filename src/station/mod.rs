//! Station module
//!
//! Wires the balance book, gate, files, tag source, and notifier into the
//! scan loop that runs for the lifetime of the process.

pub mod scan_loop;

pub use scan_loop::ScanLoop;

use crate::core::{DEFAULT_COOLDOWN, DEFAULT_SCAN_FEE};
use crate::serial::SerialConfig;
use crate::types::Balance;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration of a fare gate station
#[derive(Clone, Debug)]
pub struct StationConfig {
    /// Serial link to the reader
    pub serial: SerialConfig,
    /// Balance file (`tag,balance`)
    pub balance_file: PathBuf,
    /// Recharge queue file (`tag,amount`)
    pub recharge_file: PathBuf,
    /// Transaction log file
    pub log_file: PathBuf,
    /// Remote endpoint base URL
    pub endpoint: String,
    /// Request timeout for the remote endpoint, `None` to wait indefinitely
    pub http_timeout: Option<Duration>,
    /// Fee deducted per granted scan
    pub fee: Balance,
    /// Minimum time between two processed scans of the same tag
    pub cooldown: Duration,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            balance_file: PathBuf::from("balance_data.csv"),
            recharge_file: PathBuf::from("recharge_data.csv"),
            log_file: PathBuf::from("rfid_log.csv"),
            endpoint: String::new(),
            http_timeout: None,
            fee: DEFAULT_SCAN_FEE,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}
