//! usagemon - CPU usage monitor
//!
//! A stats server that samples `/proc/stat` and serves usages at `/stats`,
//! and a terminal client that polls that endpoint and renders the usages
//! as a list. This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod cpu;
pub mod error;
pub mod logging;
pub mod models;
pub mod poller;
pub mod server;
pub mod terminal;
pub mod traits;
pub mod ui;
