//! Errors from command line and environment configuration.

use thiserror::Error;

use super::ErrorCategory;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),

    #[error("invalid url '{0}': expected http:// or https://")]
    InvalidUrl(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

impl ConfigError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidPort(_) => "E_CFG_PORT",
            ConfigError::InvalidAddress(_) => "E_CFG_ADDR",
            ConfigError::InvalidUrl(_) => "E_CFG_URL",
            ConfigError::MissingValue(_) => "E_CFG_MISSING",
            ConfigError::UnknownArgument(_) => "E_CFG_ARG",
        }
    }
}
