//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover timer scheduling, drawing and quitting; the reducer itself
//! never touches the clock or the terminal.

use std::time::Duration;

use enum_map::Enum;

/// Timers the runtime keeps on behalf of the reducer.
///
/// At most one deadline is pending per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum TimerKind {
    /// Autoplay reveal pace.
    Reveal,
    /// Cursor blink.
    CursorBlink,
    /// Progress bar animation frame.
    ProgressFrame,
}

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Fire `timer` once after `after`, replacing any pending deadline.
    Schedule { timer: TimerKind, after: Duration },

    /// Drop every pending timer.
    CancelTimers,

    /// Compose and draw a full frame before the next event.
    Redraw,

    /// End the session.
    Quit,
}
