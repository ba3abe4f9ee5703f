//! Viewport windowing and fixed frame padding.

/// Blank lines above the code.
pub const TOP_PADDING: usize = 4;

/// Blank lines below the code.
pub const BOTTOM_PADDING: usize = 2;

/// Tab stops of left indentation before every code line.
pub const LEFT_INDENT_TABS: usize = 3;

/// Columns per tab stop, used for the indent and for tabs inside the source.
///
/// Matches the default terminal tab stop, so the frame lines up with the
/// static dump, where tabs reach the terminal unchanged.
pub const TAB_WIDTH: usize = 8;

/// Keeps only the last `max_visible` lines, in order.
pub fn window<T>(mut lines: Vec<T>, max_visible: usize) -> Vec<T> {
    if lines.len() > max_visible {
        lines.drain(..lines.len() - max_visible);
    }
    lines
}

/// Left indentation prefix for a code line.
pub fn indent() -> String {
    " ".repeat(LEFT_INDENT_TABS * TAB_WIDTH)
}
