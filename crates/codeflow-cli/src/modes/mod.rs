//! Presentation modes.
//!
//! - `dump`: Static highlighted listing with line numbers (stdout)
//! - `tui`: Full-screen progressive reveal session (optional feature)

pub mod dump;

#[cfg(feature = "tui")]
pub use codeflow_tui::run_session;

#[cfg(not(feature = "tui"))]
pub fn run_session(
    _config: codeflow_core::config::SessionConfig,
    _content: String,
    _highlighter: codeflow_core::highlight::Highlighter,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
