//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET used by the stats poller

pub mod http;

pub use http::{HttpClient, HttpError, Response};
