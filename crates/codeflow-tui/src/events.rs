//! UI events consumed by the reducer.

use std::time::Instant;

use crossterm::event::Event;

use crate::effects::TimerKind;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Autoplay reveal timer fired.
    Tick,

    /// Cursor blink timer fired at `at`.
    CursorTick { at: Instant },

    /// Progress bar wants its next animation frame.
    ProgressFrame,

    /// Raw terminal input (keys, resize).
    Terminal(Event),
}

impl UiEvent {
    /// The event a due timer turns into.
    pub fn from_timer(kind: TimerKind, at: Instant) -> Self {
        match kind {
            TimerKind::Reveal => UiEvent::Tick,
            TimerKind::CursorBlink => UiEvent::CursorTick { at },
            TimerKind::ProgressFrame => UiEvent::ProgressFrame,
        }
    }
}
