//! Error types for the RFID fare gate
//!
//! This module defines all error types that can occur while running the gate.
//! Every variant here is fatal for the scan loop: it is propagated to `main`,
//! reported, and the process exits. Conditions the loop tolerates (missing
//! balance or recharge files, non-200 responses from the remote endpoint) are
//! not errors and never reach this type.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: permission denied, disk full, etc.
//! - **CSV Parsing Errors**: malformed rows in the balance or recharge file
//! - **Arithmetic Errors**: overflow in balance calculations
//! - **Serial Errors**: port cannot be opened, tag line is not valid UTF-8
//! - **Remote Errors**: invalid endpoint URL, transport failure

use thiserror::Error;

/// Main error type for the fare gate
///
/// Each variant includes relevant context to help diagnose the failure from
/// the console output alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// The balance is left unchanged when this is returned.
    #[error("Arithmetic overflow in {operation} for tag {tag}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Tag whose balance would overflow
        tag: String,
    },

    /// The serial port could not be opened or configured
    #[error("Serial port error: {message}")]
    Serial {
        /// Description of the serial error
        message: String,
    },

    /// A line read from the serial link was not valid UTF-8
    #[error("Tag line is not valid UTF-8: {message}")]
    Decode {
        /// Description of the decode failure
        message: String,
    },

    /// The remote endpoint URL could not be parsed
    #[error("Invalid endpoint URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Description of the parse failure
        message: String,
    },

    /// The remote endpoint could not be reached
    #[error("Notification transport error: {message}")]
    Notify {
        /// Description of the transport failure
        message: String,
    },

    /// Configuration is unusable
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serialport::Error> for LedgerError {
    fn from(error: serialport::Error) -> Self {
        LedgerError::Serial {
            message: error.to_string(),
        }
    }
}

impl From<std::string::FromUtf8Error> for LedgerError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        LedgerError::Decode {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a ParseError for a field that is not an integer
    pub fn invalid_integer(value: &str, line: Option<u64>) -> Self {
        LedgerError::ParseError {
            line,
            message: format!("invalid integer '{}'", value),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, tag: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            tag: tag.to_string(),
        }
    }

    /// Create an InvalidUrl error
    pub fn invalid_url(url: &str, error: url::ParseError) -> Self {
        LedgerError::InvalidUrl {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    /// Create a Notify error
    pub fn notify(message: impl Into<String>) -> Self {
        LedgerError::Notify {
            message: message.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        LedgerError::Config {
            message: message.into(),
        }
    }
}
