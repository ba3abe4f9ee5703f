//! Session state.
//!
//! ```text
//! AppState
//! ├── config: SessionConfig      (mode + speed, immutable)
//! ├── phase: Phase               (Running / Done / Terminated)
//! ├── reveal: RevealBuffer       (full source + revealed prefix)
//! ├── cursor: CursorState        (blink visibility)
//! ├── progress: ProgressReporter (animated bar)
//! └── highlighter: Highlighter   (syntax + theme, read by render only)
//! ```
//!
//! All fields are mutated only by the reducer in `update.rs`.

use codeflow_core::config::{Mode, SessionConfig};
use codeflow_core::highlight::Highlighter;

use crate::features::cursor::CursorState;
use crate::features::progress::ProgressReporter;
use crate::features::reveal::RevealBuffer;

/// Controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Revealing.
    Running,
    /// Everything revealed; cursor and progress still animate.
    Done,
    /// User exited; nothing else happens.
    Terminated,
}

/// State of one rendering session (one file).
pub struct AppState {
    pub config: SessionConfig,
    pub phase: Phase,
    pub reveal: RevealBuffer,
    pub cursor: CursorState,
    pub progress: ProgressReporter,
    pub highlighter: Highlighter,
}

impl AppState {
    pub fn new(
        config: SessionConfig,
        content: impl Into<String>,
        highlighter: Highlighter,
    ) -> Self {
        Self {
            config,
            phase: Phase::Running,
            reveal: RevealBuffer::new(content),
            cursor: CursorState::new(),
            progress: ProgressReporter::new(),
            highlighter,
        }
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }
}
