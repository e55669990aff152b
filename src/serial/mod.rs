//! Serial link module
//!
//! - `line_source` - Generic newline-delimited `TagSource`
//! - `port` - Opening the reader's serial port

pub mod line_source;
pub mod port;

pub use line_source::LineSource;
pub use port::{open_serial_source, SerialConfig, SerialTagSource};
