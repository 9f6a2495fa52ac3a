//! UI rendering for the monitor.
//!
//! Layout, top to bottom:
//! - Header: program name and the polled endpoint
//! - The usage list
//! - Status bar: last update time, update count, key hints

mod theme;
mod usage_list;

pub use theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_QUEUED};
pub use usage_list::{render_usage_list, usage_items, LIST_TITLE};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_usage_list(frame, chunks[1], &app.usages);
    render_status_bar(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            "usagemon",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(app.endpoint.clone(), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Text of the status bar, without styling.
pub fn status_text(app: &App) -> String {
    match app.last_update {
        Some(at) => format!(
            "updated {} · {} updates · every {}ms",
            at.format("%H:%M:%S"),
            app.updates_applied,
            app.poll_interval.as_millis()
        ),
        None => format!("waiting for data · every {}ms", app.poll_interval.as_millis()),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status_color = if app.last_update.is_some() {
        COLOR_ACTIVE
    } else {
        COLOR_QUEUED
    };
    let line = Line::from(vec![
        Span::styled(status_text(app), Style::default().fg(status_color)),
        Span::styled("   q quit", Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
