//! Errors from a single poll cycle.

use thiserror::Error;

use super::ErrorCategory;
use crate::traits::HttpError;

/// Why a poll cycle did not render.
#[derive(Debug, Error)]
pub enum PollError {
    /// The request failed or the body never fully arrived.
    #[error("request failed: {0}")]
    Http(#[from] HttpError),

    /// The endpoint answered with a status other than 200.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// The body was not a valid stats document.
    #[error("invalid stats payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The view is gone; nothing left to render into.
    #[error("render channel closed")]
    ViewClosed,
}

impl PollError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PollError::Http(_) => ErrorCategory::Network,
            PollError::Status { .. } => ErrorCategory::Server,
            PollError::Decode(_) => ErrorCategory::Payload,
            PollError::ViewClosed => ErrorCategory::System,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            PollError::Http(HttpError::Timeout(_)) => "E_POLL_TIMEOUT",
            PollError::Http(HttpError::Incomplete(_)) => "E_POLL_INCOMPLETE",
            PollError::Http(_) => "E_POLL_HTTP",
            PollError::Status { .. } => "E_POLL_STATUS",
            PollError::Decode(_) => "E_POLL_DECODE",
            PollError::ViewClosed => "E_POLL_CLOSED",
        }
    }
}
