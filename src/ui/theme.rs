//! Color theme constants for the monitor UI.
//!
//! Minimal dark palette.

use ratatui::style::Color;

/// Border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for metric names
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Shown once at least one update has been applied
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Waiting for the first update
pub const COLOR_QUEUED: Color = Color::Gray;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;
