//! Blinking cursor state.

use std::time::Instant;

/// Glyph drawn after the revealed text while the cursor is visible.
pub const CURSOR_GLYPH: &str = "█";

#[derive(Debug, Clone)]
pub struct CursorState {
    visible: bool,
    last_toggle_at: Option<Instant>,
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorState {
    /// Starts visible, never toggled.
    pub fn new() -> Self {
        Self {
            visible: true,
            last_toggle_at: None,
        }
    }

    /// Flips visibility; returns the new value.
    pub fn toggle(&mut self, at: Instant) -> bool {
        self.visible = !self.visible;
        self.last_toggle_at = Some(at);
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last_toggle_at(&self) -> Option<Instant> {
        self.last_toggle_at
    }
}
