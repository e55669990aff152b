//! Scan loop
//!
//! This module provides the `ScanLoop` that orchestrates one fare gate. It
//! focuses on orchestration, delegating:
//! - Recharges to `io::recharge_file`
//! - Grant/deny decisions to `Gate`
//! - Persistence to `io::balance_file` and `io::transaction_log`
//! - Reporting to a `Notifier`
//!
//! # Iteration
//!
//! Each `tick`:
//! 1. Applies pending recharges, saving the book if any applied
//! 2. Waits for a tag line (bounded by the source's timeout)
//! 3. Drops repeated reads of the same tag inside the cooldown window
//! 4. Decides, logs the scan, saves the book, and notifies the endpoint
//!
//! Any error ends the loop; the caller decides how to report it.

use crate::core::{BalanceBook, Debouncer, Gate, Notifier, TagSource};
use crate::io::csv_format::{LogRow, LOG_TIMESTAMP_FORMAT};
use crate::io::{apply_recharges, save_balances, TransactionLog};
use crate::station::StationConfig;
use crate::types::{LedgerError, ScanOutcome};
use chrono::Local;
use std::path::PathBuf;
use std::time::Instant;

/// Single-threaded scan loop over a tag source and a notifier
pub struct ScanLoop<S, N> {
    source: S,
    notifier: N,
    book: BalanceBook,
    gate: Gate,
    debouncer: Debouncer,
    balance_file: PathBuf,
    recharge_file: PathBuf,
    log: TransactionLog,
}

impl<S: TagSource, N: Notifier> ScanLoop<S, N> {
    /// Create a scan loop owning `book`
    ///
    /// The book is the single source of truth from here on; it is written back
    /// to `config.balance_file` after every change.
    pub fn new(config: &StationConfig, book: BalanceBook, source: S, notifier: N) -> Self {
        ScanLoop {
            source,
            notifier,
            book,
            gate: Gate::new(config.fee),
            debouncer: Debouncer::new(config.cooldown),
            balance_file: config.balance_file.clone(),
            recharge_file: config.recharge_file.clone(),
            log: TransactionLog::new(config.log_file.clone()),
        }
    }

    pub fn book(&self) -> &BalanceBook {
        &self.book
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run until an error occurs
    pub fn run(&mut self) -> Result<(), LedgerError> {
        log::info!(
            "Charging {} per scan, repeated reads ignored for {}",
            self.gate.fee(),
            humantime::format_duration(self.debouncer.cooldown())
        );
        log::info!("Waiting for RFID scans...");
        loop {
            self.tick(Instant::now())?;
        }
    }

    /// Run one iteration of the loop
    ///
    /// # Arguments
    ///
    /// * `now` - Monotonic time of this iteration, used for debouncing
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ScanOutcome))` - A tag was read and processed
    /// * `Ok(None)` - No tag arrived, or the read was a debounced repeat
    /// * `Err(LedgerError)` - A file, parse, decode, or transport failure
    pub fn tick(&mut self, now: Instant) -> Result<Option<ScanOutcome>, LedgerError> {
        let applied = apply_recharges(&self.recharge_file, &mut self.book)?;
        if !applied.is_empty() {
            save_balances(&self.balance_file, &self.book)?;
        }

        let Some(tag) = self.source.next_tag()? else {
            return Ok(None);
        };
        log::info!("RFID detected: {}", tag);

        self.debouncer.prune(now);
        if !self.debouncer.admit(&tag, now) {
            log::debug!("Ignoring repeated read of {} inside cooldown", tag);
            return Ok(None);
        }

        self.process_tag(&tag).map(Some)
    }

    /// Decide, log, persist, and report a single tag presentation
    pub fn process_tag(&mut self, tag: &str) -> Result<ScanOutcome, LedgerError> {
        let outcome = self.gate.decide(&mut self.book, tag)?;
        log::info!(
            "{}: {} / {} (balance {})",
            outcome.tag,
            outcome.status,
            outcome.access,
            outcome.balance_text()
        );

        let timestamp = Local::now().format(LOG_TIMESTAMP_FORMAT).to_string();
        self.log.append(&LogRow::from_outcome(timestamp, &outcome))?;
        log::debug!("Scan logged to '{}'", self.log.path().display());

        save_balances(&self.balance_file, &self.book)?;

        self.notifier.notify(&outcome)?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NotifyStatus;
    use crate::io::load_balances;
    use crate::serial::LineSource;
    use crate::types::{Access, Status};
    use std::fs;
    use std::io::Cursor;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Notifier that records every outcome it is given
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Vec<ScanOutcome>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, outcome: &ScanOutcome) -> Result<NotifyStatus, LedgerError> {
            self.sent.push(outcome.clone());
            Ok(NotifyStatus::Delivered {
                body: "ok".to_string(),
            })
        }
    }

    /// Notifier whose endpoint is unreachable
    struct UnreachableNotifier;

    impl Notifier for UnreachableNotifier {
        fn notify(&mut self, _outcome: &ScanOutcome) -> Result<NotifyStatus, LedgerError> {
            Err(LedgerError::notify("connection refused"))
        }
    }

    fn config_in(dir: &TempDir) -> StationConfig {
        StationConfig {
            balance_file: dir.path().join("balance_data.csv"),
            recharge_file: dir.path().join("recharge_data.csv"),
            log_file: dir.path().join("rfid_log.csv"),
            endpoint: "http://localhost/exec".to_string(),
            ..StationConfig::default()
        }
    }

    fn source(lines: &str) -> LineSource<Cursor<Vec<u8>>> {
        LineSource::new(Cursor::new(lines.as_bytes().to_vec()))
    }

    fn log_lines(config: &StationConfig) -> Vec<String> {
        fs::read_to_string(&config.log_file)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_tick_without_tag_does_nothing() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        let book: BalanceBook = [("A1", 50)].into_iter().collect();
        let mut scan_loop = ScanLoop::new(&config, book, source(""), RecordingNotifier::default());

        assert_eq!(scan_loop.tick(Instant::now()).unwrap(), None);
        assert!(scan_loop.notifier().sent.is_empty());
        assert!(!config.log_file.exists());
        assert!(!config.balance_file.exists());
    }

    #[test]
    fn test_granted_scan_logs_saves_and_notifies() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        let book: BalanceBook = [("A1", 50)].into_iter().collect();
        let mut scan_loop =
            ScanLoop::new(&config, book, source("A1\n"), RecordingNotifier::default());

        let outcome = scan_loop.tick(Instant::now()).unwrap().unwrap();

        assert_eq!(outcome.balance, Some(40));
        assert_eq!(outcome.status, Status::Paid);
        assert_eq!(outcome.access, Access::Granted);
        assert_eq!(scan_loop.notifier().sent, vec![outcome]);
        assert_eq!(load_balances(&config.balance_file).unwrap().get("A1"), Some(40));

        let lines = log_lines(&config);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(",A1,40,Paid,Granted"));
    }

    #[test]
    fn test_debounced_repeat_is_not_logged() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        let book: BalanceBook = [("A1", 50)].into_iter().collect();
        let mut scan_loop =
            ScanLoop::new(&config, book, source("A1\nA1\nA1\n"), RecordingNotifier::default());
        let start = Instant::now();

        assert!(scan_loop.tick(start).unwrap().is_some());
        assert!(scan_loop
            .tick(start + Duration::from_millis(300))
            .unwrap()
            .is_none());
        assert!(scan_loop
            .tick(start + Duration::from_secs(3))
            .unwrap()
            .is_some());

        assert_eq!(scan_loop.book().get("A1"), Some(30));
        assert_eq!(log_lines(&config).len(), 2);
        assert_eq!(scan_loop.notifier().sent.len(), 2);
    }

    #[test]
    fn test_recharge_is_saved_even_without_scan() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::write(&config.recharge_file, "A1,15\n").unwrap();
        let book: BalanceBook = [("A1", 20)].into_iter().collect();
        let mut scan_loop = ScanLoop::new(&config, book, source(""), RecordingNotifier::default());

        assert_eq!(scan_loop.tick(Instant::now()).unwrap(), None);

        assert_eq!(scan_loop.book().get("A1"), Some(35));
        assert_eq!(load_balances(&config.balance_file).unwrap().get("A1"), Some(35));
        assert_eq!(fs::read_to_string(&config.recharge_file).unwrap(), "");
    }

    #[test]
    fn test_transport_error_stops_after_local_effects() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        let book: BalanceBook = [("A1", 50)].into_iter().collect();
        let mut scan_loop = ScanLoop::new(&config, book, source("A1\n"), UnreachableNotifier);

        let result = scan_loop.tick(Instant::now());

        assert!(matches!(result.unwrap_err(), LedgerError::Notify { .. }));
        assert_eq!(log_lines(&config).len(), 1);
        assert_eq!(load_balances(&config.balance_file).unwrap().get("A1"), Some(40));
    }

    #[test]
    fn test_malformed_recharge_stops_loop() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = config_in(&dir);
        fs::write(&config.recharge_file, "A1,lots\n").unwrap();
        let mut scan_loop = ScanLoop::new(
            &config,
            BalanceBook::new(),
            source("A1\n"),
            RecordingNotifier::default(),
        );

        let result = scan_loop.tick(Instant::now());

        assert!(matches!(result.unwrap_err(), LedgerError::ParseError { .. }));
        assert!(scan_loop.notifier().sent.is_empty());
    }
}
