//! Runtime configuration for the monitor and the stats server.
//!
//! Both structs use the builder pattern:
//!
//! ```ignore
//! use usagemon::config::MonitorConfig;
//!
//! let config = MonitorConfig::default().with_base_url("http://10.0.0.5:8080")?;
//! assert_eq!(config.stats_url(), "http://10.0.0.5:8080/stats");
//! ```

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::error::ConfigError;

/// Path of the stats endpoint, relative to the base URL.
pub const STATS_PATH: &str = "/stats";

/// Interval between polls in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 50;

/// Default server the monitor polls.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default address the stats server binds to.
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));

/// Delay between the two `/proc/stat` reads of one sample.
pub const CPU_READ_INTERVAL_MS: u64 = 200;

/// Environment variable overriding the monitor's base URL.
pub const ENV_URL: &str = "USAGEMON_URL";

/// Environment variable overriding the server's bind address.
pub const ENV_BIND: &str = "USAGEMON_BIND";

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "USAGEMON_LOG";

/// Configuration for the polling monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Scheme, host and port of the server, without a trailing slash
    pub base_url: String,
    /// Time between poll cycles
    pub poll_interval: Duration,
    /// TCP connect timeout for each request
    pub connect_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(url.as_ref())?;
        Ok(self)
    }

    /// Override the poll interval. Only used programmatically (tests);
    /// there is no flag or variable for it.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of the stats endpoint.
    pub fn stats_url(&self) -> String {
        format!("{}{}", self.base_url, STATS_PATH)
    }

    /// Defaults, with `USAGEMON_URL` applied when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_URL) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url.trim()),
            _ => Ok(Self::default()),
        }
    }
}

/// Configuration for the stats server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Delay between the two reads of a CPU sample
    pub cpu_read_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            cpu_read_interval: Duration::from_millis(CPU_READ_INTERVAL_MS),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// Keep the bind IP and change only the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind.set_port(port);
        self
    }

    pub fn with_cpu_read_interval(mut self, interval: Duration) -> Self {
        self.cpu_read_interval = interval;
        self
    }

    /// Defaults, with `USAGEMON_BIND` applied when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENV_BIND) {
            Ok(bind) if !bind.trim().is_empty() => {
                let addr = parse_bind(bind.trim())?;
                Ok(Self::default().with_bind(addr))
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Parse a port number given on the command line.
pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

/// Parse a socket address such as `127.0.0.1:8080`.
pub fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidAddress(value.to_string()))
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let lower = url.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }
    let trimmed = url.trim_end_matches('/');
    let host = trimmed.split_once("://").map(|(_, rest)| rest).unwrap_or("");
    if host.is_empty() {
        return Err(ConfigError::InvalidUrl(url.to_string()));
    }
    Ok(trimmed.to_string())
}
