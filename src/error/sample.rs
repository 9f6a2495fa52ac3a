//! Errors from CPU usage sampling.

use thiserror::Error;

use super::ErrorCategory;

/// Failure to produce a CPU usage sample.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The stat source could not be read.
    #[error("failed to read cpu statistics: {0}")]
    Io(#[from] std::io::Error),

    /// A counter on a cpu line was not a number.
    #[error("invalid counter '{value}' on line '{line}'")]
    Parse { line: String, value: String },

    /// The counters on a cpu line do not fit in 64 bits when summed.
    #[error("cpu counters overflow on line '{line}'")]
    Overflow { line: String },

    /// No cpu lines were found at all.
    #[error("no cpu lines found in statistics")]
    NoCpuLines,
}

impl SampleError {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::System
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SampleError::Io(_) => "E_CPU_IO",
            SampleError::Parse { .. } => "E_CPU_PARSE",
            SampleError::Overflow { .. } => "E_CPU_OVERFLOW",
            SampleError::NoCpuLines => "E_CPU_EMPTY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SampleError = io_err.into();
        assert_eq!(err.error_code(), "E_CPU_IO");
        assert_eq!(err.to_string(), "failed to read cpu statistics: missing");
    }

    #[test]
    fn test_parse_error_message() {
        let err = SampleError::Parse {
            line: "cpu x".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "invalid counter 'x' on line 'cpu x'");
    }
}
