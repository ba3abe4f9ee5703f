//! Sequential per-file presentation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codeflow_core::config::{Mode, ModeSetting, SessionConfig, Speed};
use codeflow_core::highlight::Highlighter;
use codeflow_core::interrupt;
use codeflow_core::themes::Theme;

use crate::modes;

/// How each file is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Whole file at once, highlighted, with line numbers.
    Dump,
    /// Full-screen progressive reveal.
    Session(Mode),
}

impl Presentation {
    /// Resolves mode flags against the configured default.
    ///
    /// `-d` and `-i` are mutually exclusive at the parser level.
    pub fn resolve(interactive: bool, display: bool, setting: ModeSetting) -> Self {
        if display {
            return Presentation::Session(Mode::Autoplay);
        }
        if interactive {
            return Presentation::Session(Mode::Interactive);
        }
        match setting {
            ModeSetting::Dump => Presentation::Dump,
            ModeSetting::Display => Presentation::Session(Mode::Autoplay),
            ModeSetting::Interactive => Presentation::Session(Mode::Interactive),
        }
    }
}

pub struct ShowOptions<'a> {
    pub files: &'a [PathBuf],
    pub theme: &'a Theme,
    pub presentation: Presentation,
    pub speed: Speed,
}

/// Shows every file in order.
///
/// Leaving a session with an exit key moves on to the next file; a signal
/// stops the whole run.
///
/// # Errors
/// Returns an error if a file cannot be read, a session fails, or the
/// process was interrupted.
pub fn run(opts: &ShowOptions<'_>) -> Result<()> {
    for path in opts.files {
        if interrupt::is_interrupted() {
            return Err(interrupt::InterruptedError.into());
        }
        show_file(path, opts)?;
    }

    if interrupt::is_interrupted() {
        return Err(interrupt::InterruptedError.into());
    }
    Ok(())
}

fn show_file(path: &Path, opts: &ShowOptions<'_>) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Error reading file {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", header(path))?;
    stdout.flush()?;

    let highlighter = Highlighter::for_path(path, opts.theme.clone());
    tracing::info!(
        path = %path.display(),
        language = highlighter.language(),
        fallback = highlighter.is_fallback(),
        chars = content.chars().count(),
        presentation = ?opts.presentation,
        "showing file"
    );

    match opts.presentation {
        Presentation::Dump => modes::dump::print(&content, &highlighter, &mut stdout),
        Presentation::Session(mode) => {
            drop(stdout);
            let config = SessionConfig::new(mode, opts.speed);
            modes::run_session(config, content, highlighter)
                .with_context(|| format!("Error running session for {}", path.display()))
        }
    }
}

/// Banner printed before each file.
pub fn header(path: &Path) -> String {
    format!("\n------------ {} ---------------------\n\n", path.display())
}
