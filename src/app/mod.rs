//! Application state for the terminal monitor.
//!
//! `App` owns the displayed [`UsageList`]. Background tasks never touch it
//! directly; they send [`AppMessage`]s that the UI loop applies one at a
//! time through [`App::handle_message`].

mod messages;

pub use messages::AppMessage;

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::trace;

use crate::config::MonitorConfig;
use crate::models::UsageList;

/// Terminal monitor state.
pub struct App {
    /// Currently displayed rows
    pub usages: UsageList,
    /// Stats endpoint shown in the header
    pub endpoint: String,
    pub poll_interval: Duration,
    /// Wall-clock time of the last applied update
    pub last_update: Option<DateTime<Local>>,
    /// Number of updates applied so far
    pub updates_applied: u64,
    /// Request sequence number of the list on screen
    pub shown_seq: Option<u64>,
    /// Redraw on the next loop iteration
    pub needs_redraw: bool,
    pub should_quit: bool,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the UI loop for `select!`
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    pub fn new(config: &MonitorConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            usages: UsageList::new(),
            endpoint: config.stats_url(),
            poll_interval: config.poll_interval,
            last_update: None,
            updates_applied: 0,
            shown_seq: None,
            needs_redraw: true,
            should_quit: false,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::UsagesUpdated { seq, list } => self.apply_usages(seq, list),
        }
    }

    /// Replace the displayed list wholesale.
    ///
    /// Applied regardless of `seq`: a late response to an older request
    /// replaces a newer list.
    pub fn apply_usages(&mut self, seq: u64, list: UsageList) {
        if let Some(shown) = self.shown_seq {
            if seq < shown {
                trace!(seq, shown, "Rendering response older than the one on screen");
            }
        }
        self.usages = list;
        self.shown_seq = Some(seq);
        self.last_update = Some(Local::now());
        self.updates_applied += 1;
        self.mark_dirty();
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                true
            }
            _ => false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatsResponse;

    fn list(json: &str) -> UsageList {
        UsageList::from(StatsResponse::from_slice(json.as_bytes()).unwrap())
    }

    fn app() -> App {
        let mut app = App::new(&MonitorConfig::default());
        app.needs_redraw = false;
        app
    }

    #[test]
    fn test_new_app_is_empty() {
        let app = App::new(&MonitorConfig::default());
        assert!(app.usages.is_empty());
        assert!(app.needs_redraw);
        assert_eq!(app.endpoint, "http://127.0.0.1:8080/stats");
        assert!(app.message_rx.is_some());
    }

    #[test]
    fn test_update_replaces_list() {
        let mut app = app();
        app.apply_usages(0, list(r#"{"usages": {"a": 1, "b": 2, "c": 3}}"#));
        app.apply_usages(1, list(r#"{"usages": {"d": 4}}"#));

        assert_eq!(app.usages.labels(), vec!["d: 4.00"]);
        assert_eq!(app.updates_applied, 2);
        assert!(app.needs_redraw);
        assert!(app.last_update.is_some());
    }

    #[test]
    fn test_same_response_twice_is_idempotent() {
        let mut app = app();
        let payload = r#"{"usages": {"cpu": 12.5, "mem": 7.333}}"#;

        app.apply_usages(0, list(payload));
        let first = app.usages.labels();
        app.apply_usages(1, list(payload));

        assert_eq!(app.usages.labels(), first);
        assert_eq!(app.usages.len(), 2);
    }

    #[test]
    fn test_empty_usages_clears_list() {
        let mut app = app();
        app.apply_usages(0, list(r#"{"usages": {"cpu": 1}}"#));
        app.apply_usages(1, list(r#"{"usages": {}}"#));
        assert!(app.usages.is_empty());
    }

    #[test]
    fn test_older_response_processed_last_wins() {
        let mut app = app();
        let a = list(r#"{"usages": {"cpu": 1}}"#);
        let b = list(r#"{"usages": {"cpu": 2}}"#);

        // B (seq 1) processed first, then A (seq 0)
        app.handle_message(AppMessage::UsagesUpdated { seq: 1, list: b });
        app.handle_message(AppMessage::UsagesUpdated { seq: 0, list: a });

        assert_eq!(app.usages.labels(), vec!["cpu: 1.00"]);
        assert_eq!(app.shown_seq, Some(0));
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            assert!(app.handle_key(key));
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut app = app();
        assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!app.should_quit);
    }
}
