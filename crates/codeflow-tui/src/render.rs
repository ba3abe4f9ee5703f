//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, never mutate it and never return
//! effects. Every draw composes the whole frame from scratch:
//!
//! ```text
//! ████████████░░░░░░░░░░░░░░░░░░░░░░  34%   progress bar
//!  • Esc: exit                              help hint
//!                                           4 blank lines
//!             fn main() {                   last N code lines, indented
//!                 println!("hi");█          cursor after revealed text
//!                                           2 blank lines
//! ```

use codeflow_core::highlight::{HighlightError, SpanStyle, StyledLine};
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::sanitize_for_display;
use crate::features::cursor::CURSOR_GLYPH;
use crate::features::viewport::{self, BOTTOM_PADDING, TOP_PADDING};
use crate::state::AppState;

/// Help line shown under the progress bar.
pub const HELP_HINT: &str = " • Esc: exit";

/// Progress bar and help hint.
const HEADER_LINES: usize = 2;

const HINT_COLOR: Color = Color::Indexed(240);
const ERROR_COLOR: Color = Color::Red;

/// Renders the current frame.
///
/// On a terminal shorter than the frame, the header stays pinned and the
/// oldest body lines are dropped, so the newest code and the cursor stay
/// on screen.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let lines = fit_to_height(compose(app), usize::from(area.height));
    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds every line of the frame.
pub fn compose(app: &AppState) -> Vec<Line<'static>> {
    compose_from(app, app.highlighter.highlight(app.reveal.revealed()))
}

/// Builds the frame from an already highlighted revealed prefix.
fn compose_from(
    app: &AppState,
    highlighted: Result<Vec<StyledLine>, HighlightError>,
) -> Vec<Line<'static>> {
    let mut code = code_lines(app, highlighted);
    if app.cursor.is_visible()
        && let Some(last) = code.last_mut()
    {
        last.push_span(Span::raw(CURSOR_GLYPH));
    }
    let visible = viewport::window(code, app.mode().max_visible_lines());

    let mut lines = Vec::with_capacity(HEADER_LINES + TOP_PADDING + visible.len() + BOTTOM_PADDING);
    lines.push(app.progress.line());
    lines.push(Line::styled(HELP_HINT, Style::default().fg(HINT_COLOR)));
    lines.extend(std::iter::repeat_n(Line::default(), TOP_PADDING));

    let indent = viewport::indent();
    for line in visible {
        let mut spans = Vec::with_capacity(line.spans.len() + 1);
        spans.push(Span::raw(indent.clone()));
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }

    lines.extend(std::iter::repeat_n(Line::default(), BOTTOM_PADDING));
    lines
}

/// Trims a composed frame to `height` rows, keeping the header and the tail.
fn fit_to_height(mut lines: Vec<Line<'static>>, height: usize) -> Vec<Line<'static>> {
    if lines.len() <= height {
        return lines;
    }
    if height <= HEADER_LINES {
        return viewport::window(lines, height);
    }
    let body = lines.split_off(HEADER_LINES);
    lines.extend(viewport::window(body, height - HEADER_LINES));
    lines
}

/// Converts highlighted lines, degrading to an inline error line.
fn code_lines(
    app: &AppState,
    highlighted: Result<Vec<StyledLine>, HighlightError>,
) -> Vec<Line<'static>> {
    match highlighted {
        Ok(styled) => styled.into_iter().map(to_line).collect(),
        Err(err) => {
            tracing::warn!(
                error = %err,
                revealed = app.reveal.revealed_count(),
                "highlighting failed for frame"
            );
            vec![error_line(&err)]
        }
    }
}

fn error_line(err: &impl std::fmt::Display) -> Line<'static> {
    Line::styled(format!("Error: {err}"), Style::default().fg(ERROR_COLOR))
}

fn to_line(styled: StyledLine) -> Line<'static> {
    let spans: Vec<Span<'static>> = styled
        .into_iter()
        .map(|span| {
            let text = sanitize_for_display(&span.text).into_owned();
            Span::styled(text, to_style(span.style))
        })
        .collect();
    Line::from(spans)
}

fn to_style(style: SpanStyle) -> Style {
    let (r, g, b) = style.foreground;
    let mut out = Style::default().fg(Color::Rgb(r, g, b));
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
