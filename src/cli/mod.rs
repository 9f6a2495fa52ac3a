//! Command-line interface.
//!
//! ```ignore
//! use usagemon::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command)?;
//! ```

pub mod args;
pub mod monitor;
pub mod serve;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use monitor::{handle_monitor_command, run_app, run_monitor};
pub use serve::handle_serve_command;
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

/// Dispatch a parsed command.
pub fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        CliCommand::Serve { port } => handle_serve_command(port),
        CliCommand::Monitor { url } => handle_monitor_command(url),
    }
}
