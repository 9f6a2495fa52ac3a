//! Error types for usagemon.
//!
//! - **Error Categories**: high-level classification used for logging
//! - **Domain Errors**: [`PollError`] for a poll cycle, [`SampleError`] for
//!   CPU sampling, [`ConfigError`] for command line and environment input
//!
//! None of the poll errors is surfaced to the user or retried; the next
//! timer tick simply tries again. They exist so each cycle's outcome is an
//! explicit `Result` that can be logged with a stable code.
//!
//! | Category | Description |
//! |----------|-------------|
//! | Network | Connection, timeout, incomplete body |
//! | Server | Non-200 status |
//! | Payload | Body is not a valid stats document |
//! | System | OS/filesystem errors |
//! | Configuration | Bad flag or env value |

mod category;
mod config;
mod poll;
mod sample;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use poll::PollError;
pub use sample::SampleError;
