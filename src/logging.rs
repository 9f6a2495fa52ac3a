//! Tracing subscriber setup.
//!
//! The TUI owns stdout and stderr, so it logs to
//! `~/.usagemon/logs/usagemon.log`. The server logs to stderr. In both
//! cases the filter comes from `USAGEMON_LOG` and falls back to the given
//! default directive.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::config::ENV_LOG;

/// File name of the TUI log.
pub const LOG_FILE_NAME: &str = "usagemon.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file inside this directory
    Directory(PathBuf),
}

/// `~/.usagemon/logs`, or None when there is no home directory.
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".usagemon").join("logs"))
}

/// Open (creating as needed) the log file inside `dir`.
pub fn open_log_file(dir: &Path) -> std::io::Result<File> {
    std::fs::create_dir_all(dir)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(target: &LogTarget, default_directive: &str) -> Result<()> {
    let filter = env_filter(default_directive);

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::Directory(dir) => {
            let file = open_log_file(dir)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| eyre!("failed to install log subscriber: {}", e))
}
