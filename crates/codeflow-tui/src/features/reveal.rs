//! Reveal buffer: the full source plus the prefix disclosed so far.

/// Source text with a monotonically growing revealed prefix.
///
/// The revealed prefix is accumulated in its own buffer so a redraw never
/// has to re-slice the full content. Units are `char`s.
#[derive(Debug)]
pub struct RevealBuffer {
    content: String,
    revealed: String,
    revealed_count: usize,
    total: usize,
}

impl RevealBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let total = content.chars().count();
        Self {
            revealed: String::with_capacity(content.len()),
            content,
            revealed_count: 0,
            total,
        }
    }

    /// Discloses one more character.
    ///
    /// Returns the new revealed count and whether the buffer is complete.
    /// A no-op once complete.
    pub fn advance_one(&mut self) -> (usize, bool) {
        if let Some(ch) = self.content[self.revealed.len()..].chars().next() {
            self.revealed.push(ch);
            self.revealed_count += 1;
        }
        (self.revealed_count, self.is_complete())
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_count == self.total
    }

    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Revealed fraction in `[0, 1]`; an empty source counts as fully revealed.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.revealed_count as f64 / self.total as f64
        }
    }
}
