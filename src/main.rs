//! RFID Fare Gate
//!
//! Reads tag scans from a serial RFID reader and charges them against the
//! balance file until the process is stopped.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --endpoint https://script.google.com/macros/s/.../exec
//! cargo run -- --port COM5 --fee 15 --endpoint "$URL"
//! RFID_ENDPOINT_URL="$URL" RUST_LOG=debug cargo run
//! ```
//!
//! # Exit Codes
//!
//! - 1: Fatal error (serial port unavailable, malformed balance or recharge
//!   file, endpoint unreachable, etc.)
//!
//! The scan loop never finishes on its own.

use rfid_fare_gate::cli;
use rfid_fare_gate::io::load_balances;
use rfid_fare_gate::notify::SheetsNotifier;
use rfid_fare_gate::serial::open_serial_source;
use rfid_fare_gate::station::ScanLoop;
use rfid_fare_gate::LedgerError;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();
    let config = args.to_station_config();

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(config: &rfid_fare_gate::StationConfig) -> Result<(), LedgerError> {
    // Validate the endpoint before touching the serial port
    let notifier = SheetsNotifier::new(&config.endpoint, config.http_timeout)?;
    log::info!("Reporting scans to {}", notifier.endpoint());
    let book = load_balances(&config.balance_file)?;
    log::info!(
        "Loaded {} balance(s) from '{}'",
        book.len(),
        config.balance_file.display()
    );

    let source = open_serial_source(&config.serial)?;

    ScanLoop::new(config, book, source, notifier).run()
}
