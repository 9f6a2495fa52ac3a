//! Default command: poll a stats server and show the usages in the terminal.

use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tracing::{info, warn};

use crate::app::App;
use crate::config::MonitorConfig;
use crate::logging::{default_log_dir, init_logging, LogTarget};
use crate::poller::StatsPoller;
use crate::terminal::{setup_panic_hook, TerminalManager};
use crate::ui;

/// Build the monitor config from the environment and the `--url` flag.
pub fn monitor_config(url: Option<String>) -> Result<MonitorConfig> {
    let config = MonitorConfig::from_env()?;
    Ok(match url {
        Some(url) => config.with_base_url(url)?,
        None => config,
    })
}

pub fn handle_monitor_command(url: Option<String>) -> Result<()> {
    let config = monitor_config(url)?;

    // Logging is best effort; the monitor runs without it
    if let Some(dir) = default_log_dir() {
        if let Err(e) = init_logging(&LogTarget::Directory(dir), "warn") {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_monitor(config))
}

/// Start the poller, run the UI until quit, then stop the poller.
pub async fn run_monitor(config: MonitorConfig) -> Result<()> {
    let mut app = App::new(&config);

    let poller = Arc::new(StatsPoller::with_reqwest(&config, app.message_tx.clone()));
    let poller_handle = poller.start();

    let mut term_manager = TerminalManager::new()?;
    let result = run_app(term_manager.terminal(), &mut app).await;

    poller_handle.stop();
    term_manager.restore();
    info!("Monitor exited after {} updates", app.updates_applied);

    result
}

/// UI loop: redraw when dirty, then wait for a key or a poll result.
pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    app.handle_key(key);
                }
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Terminal event error: {}", e);
                    return Err(e.into());
                }
                None => return Ok(()),
            },

            message = message_rx.recv() => match message {
                Some(message) => app.handle_message(message),
                None => return Ok(()),
            },
        }
    }
}
