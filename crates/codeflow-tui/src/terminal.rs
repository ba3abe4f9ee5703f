//! Terminal lifecycle for a reveal session.
//!
//! A session owns the alternate screen in raw mode. Leaving it is handled in
//! three places: `Drop` of the runtime, the panic hook, and the interrupt
//! restore hook (second signal).

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal type drawn into by the runtime.
pub type SessionTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Enters raw mode and a blank alternate screen with the hardware cursor
/// hidden (the session draws its own block cursor).
///
/// # Errors
/// Returns an error if any terminal command fails.
pub fn setup_terminal() -> Result<SessionTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All), Hide)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Leaves the alternate screen and raw mode. Idempotent.
///
/// # Errors
/// Returns an error if any terminal command fails.
pub fn restore_terminal() -> Result<()> {
    // Still in raw mode here, so the sequence is written unmodified.
    execute!(io::stdout(), Show, LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

/// Restores the terminal before the default panic output.
///
/// Installed once per process; later sessions reuse it.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous(info);
        }));
    });
}
