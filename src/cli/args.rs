//! Command-line argument parsing.

use crate::config::parse_port;
use crate::error::ConfigError;

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
usagemon - CPU usage monitor

USAGE:
    usagemon [--url <base-url>]     Watch a stats server in the terminal
    usagemon serve [--port <port>]  Serve CPU usage at /stats

OPTIONS:
    --url <base-url>   Server to poll (default http://127.0.0.1:8080, env USAGEMON_URL)
    --port <port>      Port to listen on (default 8080, env USAGEMON_BIND)
    -V, --version      Print version
    -h, --help         Print this help
";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    /// Run the stats server
    Serve { port: Option<u16> },
    /// Run the terminal monitor (default)
    Monitor { url: Option<String> },
}

/// Parse command-line arguments, program name first.
///
/// ```
/// use usagemon::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["usagemon".to_string(), "serve".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Serve { port: None });
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1).peekable();

    let serve = args.peek().map(|a| a == "serve").unwrap_or(false);
    if serve {
        args.next();
    }

    let mut port = None;
    let mut url = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--port" | "-p" if serve => {
                let value = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                port = Some(parse_port(&value)?);
            }
            "--url" | "-u" if !serve => {
                let value = args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(arg.clone()))?;
                url = Some(value);
            }
            _ => return Err(ConfigError::UnknownArgument(arg.clone())),
        }
    }

    if serve {
        Ok(CliCommand::Serve { port })
    } else {
        Ok(CliCommand::Monitor { url })
    }
}
