// CLI module
// Command-line interface and configuration parsing

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Every option can also be set through its `RFID_*` environment variable.
/// If parsing fails (e.g., invalid arguments, missing endpoint, or --help
/// flag), clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
