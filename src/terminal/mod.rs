//! Terminal management with RAII cleanup.
//!
//! ```no_run
//! use usagemon::terminal::TerminalManager;
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut term_manager = TerminalManager::new()?;
//!     let terminal = term_manager.terminal();
//!     // ... draw ...
//!     Ok(())
//! } // terminal restored here
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    cleaned_up: bool,
    restore: fn(),
}

fn restore_stdout() {
    leave_tui_mode(&mut io::stdout());
}

impl TerminalGuard {
    fn new() -> Self {
        Self::with_restore(restore_stdout)
    }

    fn with_restore(restore: fn()) -> Self {
        Self {
            cleaned_up: false,
            restore,
        }
    }

    /// Restore now. Subsequent calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        (self.restore)();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Owns the ratatui terminal for the lifetime of the TUI.
///
/// Creating it enables raw mode and enters the alternate screen; dropping
/// it undoes both. [`setup_panic_hook`] covers the panic path.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        // The guard exists before raw mode is enabled, so a failed setup
        // still restores the terminal.
        let (terminal, guard) = guarded(TerminalGuard::new(), setup_terminal)?;
        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before the manager is dropped.
    pub fn restore(&mut self) {
        self.guard.cleanup();
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    enter_tui_mode(&mut stdout)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

/// Run `setup` while `guard` is armed. On error the guard is dropped and
/// restores the terminal.
fn guarded<T>(
    guard: TerminalGuard,
    setup: impl FnOnce() -> Result<T>,
) -> Result<(T, TerminalGuard)> {
    let value = setup()?;
    Ok((value, guard))
}
