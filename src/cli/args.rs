use crate::serial::SerialConfig;
use crate::station::StationConfig;
use crate::types::Balance;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Charge RFID tags at a fare gate and report every scan
#[derive(Parser, Debug)]
#[command(name = "rfid-fare-gate")]
#[command(about = "Charge RFID tags at a fare gate and report every scan", long_about = None)]
pub struct CliArgs {
    /// Serial port the RFID reader is attached to
    #[arg(
        long = "port",
        env = "RFID_SERIAL_PORT",
        value_name = "PORT",
        default_value = "/dev/ttyUSB0",
        help = "Serial port of the RFID reader (e.g. /dev/ttyUSB0, COM5)"
    )]
    pub port: String,

    /// Serial baud rate
    #[arg(
        long = "baud",
        env = "RFID_BAUD_RATE",
        value_name = "RATE",
        default_value_t = 9600
    )]
    pub baud_rate: u32,

    /// Upper bound on a single serial read
    #[arg(
        long = "serial-timeout",
        env = "RFID_SERIAL_TIMEOUT",
        value_name = "DURATION",
        default_value = "1s",
        value_parser = humantime::parse_duration
    )]
    pub serial_timeout: Duration,

    /// Pause after opening the serial port
    #[arg(
        long = "settle-delay",
        env = "RFID_SETTLE_DELAY",
        value_name = "DURATION",
        default_value = "2s",
        value_parser = humantime::parse_duration
    )]
    pub settle_delay: Duration,

    /// Balance file (`tag,balance` rows)
    #[arg(
        long = "balance-file",
        env = "RFID_BALANCE_FILE",
        value_name = "PATH",
        default_value = "balance_data.csv"
    )]
    pub balance_file: PathBuf,

    /// Recharge queue file (`tag,amount` rows)
    #[arg(
        long = "recharge-file",
        env = "RFID_RECHARGE_FILE",
        value_name = "PATH",
        default_value = "recharge_data.csv"
    )]
    pub recharge_file: PathBuf,

    /// Transaction log file
    #[arg(
        long = "log-file",
        env = "RFID_LOG_FILE",
        value_name = "PATH",
        default_value = "rfid_log.csv"
    )]
    pub log_file: PathBuf,

    /// Endpoint that receives every scan as query parameters
    #[arg(long = "endpoint", env = "RFID_ENDPOINT_URL", value_name = "URL")]
    pub endpoint: String,

    /// Request timeout for the endpoint (waits indefinitely when unset)
    #[arg(
        long = "http-timeout",
        env = "RFID_HTTP_TIMEOUT",
        value_name = "DURATION",
        value_parser = humantime::parse_duration
    )]
    pub http_timeout: Option<Duration>,

    /// Fee deducted per granted scan
    #[arg(
        long = "fee",
        env = "RFID_SCAN_FEE",
        value_name = "UNITS",
        default_value_t = crate::core::DEFAULT_SCAN_FEE,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    pub fee: Balance,

    /// Minimum time between two processed scans of the same tag
    #[arg(
        long = "cooldown",
        env = "RFID_COOLDOWN",
        value_name = "DURATION",
        default_value = "2s",
        value_parser = humantime::parse_duration
    )]
    pub cooldown: Duration,
}

impl CliArgs {
    /// Create a StationConfig from CLI arguments
    ///
    /// A zero serial timeout would turn the loop into a busy poll, so it
    /// falls back to the default with a warning. A zero fee is kept but
    /// warned about.
    pub fn to_station_config(&self) -> StationConfig {
        let default_serial = SerialConfig::default();

        let read_timeout = if self.serial_timeout.is_zero() {
            log::warn!(
                "Invalid serial timeout (0), using default ({:?})",
                default_serial.read_timeout
            );
            default_serial.read_timeout
        } else {
            self.serial_timeout
        };

        if self.fee == 0 {
            log::warn!("Scan fee is 0, every granted scan is free");
        }

        StationConfig {
            serial: SerialConfig {
                port: self.port.clone(),
                baud_rate: self.baud_rate,
                read_timeout,
                settle_delay: self.settle_delay,
            },
            balance_file: self.balance_file.clone(),
            recharge_file: self.recharge_file.clone(),
            log_file: self.log_file.clone(),
            endpoint: self.endpoint.clone(),
            http_timeout: self.http_timeout,
            fee: self.fee,
            cooldown: self.cooldown,
        }
    }
}
