//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use usagemon::app::{App, AppMessage};
use usagemon::config::MonitorConfig;
use usagemon::models::{StatsResponse, UsageList};

/// Body of a `/stats` response with the given metrics, in order.
pub fn stats_body(metrics: &[(&str, f64)]) -> String {
    let usages = metrics.iter().map(|(k, v)| (*k, *v)).collect();
    serde_json::to_string(&StatsResponse::new(usages)).unwrap()
}

/// Parse a body into the list the view would show.
pub fn usage_list(body: &str) -> UsageList {
    UsageList::from(StatsResponse::from_slice(body.as_bytes()).unwrap())
}

pub fn test_app() -> App {
    App::new(&MonitorConfig::default())
}

/// Apply every message currently queued for the view, in arrival order.
pub fn drain_into(app: &mut App, rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppMessage>) -> usize {
    let mut applied = 0;
    while let Ok(message) = rx.try_recv() {
        app.handle_message(message);
        applied += 1;
    }
    applied
}

/// Screen rows of a test terminal, trailing spaces trimmed.
pub fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}
