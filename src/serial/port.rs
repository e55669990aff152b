//! Serial port setup for the RFID reader

use crate::serial::line_source::LineSource;
use crate::types::LedgerError;
use serialport::SerialPort;
use std::io::BufReader;
use std::thread;
use std::time::Duration;

/// Tag source reading from an open serial port
pub type SerialTagSource = LineSource<BufReader<Box<dyn SerialPort>>>;

/// Serial link parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    /// Device path or port name (e.g. `/dev/ttyUSB0`, `COM5`)
    pub port: String,
    pub baud_rate: u32,
    /// Upper bound on a single blocking read
    pub read_timeout: Duration,
    /// Pause after opening; many reader boards reset when the port opens
    pub settle_delay: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout: Duration::from_secs(1),
            settle_delay: Duration::from_secs(2),
        }
    }
}

/// Open the reader's serial port and wait for it to settle
pub fn open_serial_source(config: &SerialConfig) -> Result<SerialTagSource, LedgerError> {
    let port = serialport::new(config.port.as_str(), config.baud_rate)
        .timeout(config.read_timeout)
        .open()?;

    log::info!(
        "Opened serial port {} at {} baud",
        config.port,
        config.baud_rate
    );

    if !config.settle_delay.is_zero() {
        thread::sleep(config.settle_delay);
    }

    Ok(LineSource::new(BufReader::new(port)))
}
