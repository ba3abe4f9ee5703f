//! Text utilities for TUI rendering.

use std::borrow::Cow;

use crate::features::viewport::TAB_WIDTH;

/// Sanitizes source text for display by expanding tabs and dropping escapes.
///
/// ### Tab Expansion
/// ratatui measures a tab as zero columns while a terminal advances it to
/// the next tab stop, which corrupts the cell grid. Tabs are therefore
/// replaced with a fixed [`TAB_WIDTH`] spaces. This is exact for indentation
/// and slightly off for tabs in the middle of a line.
///
/// ### Escapes
/// Raw `ESC` bytes in a source file would be interpreted by the terminal, so
/// they are removed.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    // Only allocate if we actually need to make changes
    if s.contains('\x1b') || s.contains('\t') {
        Cow::Owned(s.replace('\x1b', "").replace('\t', &" ".repeat(TAB_WIDTH)))
    } else {
        Cow::Borrowed(s)
    }
}
