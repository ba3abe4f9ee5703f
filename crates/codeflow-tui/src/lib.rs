//! Full-screen progressive reveal sessions for codeflow.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use codeflow_core::config::SessionConfig;
use codeflow_core::highlight::Highlighter;
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs one reveal session over `content` until the user exits.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub fn run_session(config: SessionConfig, content: String, highlighter: Highlighter) -> Result<()> {
    // Session modes require a terminal to render the TUI
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Display and interactive modes require a terminal.\n\
             Run without -d/-i to print the highlighted file instead."
        );
    }

    let state = AppState::new(config, content, highlighter);
    let mut runtime = TuiRuntime::new(state)?;
    runtime.run()
}
