//! Syntax highlighting adapter.
//!
//! Wraps syntect behind a small API: pick a syntax from a file path, pick a
//! theme, and turn text into styled lines. The caller decides how to draw
//! the result (ratatui spans in the TUI, ANSI escapes in dump mode).
//!
//! Syntax definitions are parsed once per process and shared through a
//! `OnceLock`; every [`Highlighter`] borrows from that set.

use std::path::Path;
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme};
use syntect::parsing::{SyntaxReference, SyntaxSet};

static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Tokenization failure for one highlight pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightError(String);

impl HighlightError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HighlightError {}

impl From<syntect::Error> for HighlightError {
    fn from(err: syntect::Error) -> Self {
        Self(err.to_string())
    }
}

/// Foreground color and font flags of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub foreground: (u8, u8, u8),
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl From<Style> for SpanStyle {
    fn from(style: Style) -> Self {
        let fg = style.foreground;
        Self {
            foreground: (fg.r, fg.g, fg.b),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// One display line; never contains a newline.
pub type StyledLine = Vec<StyledSpan>;

/// A syntax + theme pair for one file.
pub struct Highlighter {
    syntax: &'static SyntaxReference,
    theme: Theme,
    fallback: bool,
}

impl Highlighter {
    /// Selects a syntax by file extension, then by file name, falling back
    /// to plain text.
    pub fn for_path(path: &Path, theme: Theme) -> Self {
        let syntaxes = syntax_set();
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| syntaxes.find_syntax_by_extension(ext));
        let by_name = || {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| syntaxes.find_syntax_by_extension(name))
        };

        match by_extension.or_else(by_name) {
            Some(syntax) => Self {
                syntax,
                theme,
                fallback: false,
            },
            None => Self {
                syntax: syntaxes.find_syntax_plain_text(),
                theme,
                fallback: true,
            },
        }
    }

    /// Name of the selected syntax (e.g. "Rust", "Plain Text").
    pub fn language(&self) -> &str {
        &self.syntax.name
    }

    /// True when no syntax matched and plain text is used.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Tokenizes `text` from scratch.
    ///
    /// Yields `count('\n') + 1` lines: a trailing newline produces a trailing
    /// empty line.
    ///
    /// # Errors
    /// Returns [`HighlightError`] if the tokenizer rejects the input.
    pub fn highlight(&self, text: &str) -> Result<Vec<StyledLine>, HighlightError> {
        let syntaxes = syntax_set();
        let mut lines = HighlightLines::new(self.syntax, &self.theme);
        let mut out = Vec::with_capacity(text.matches('\n').count() + 1);

        let mut rest = text;
        loop {
            let (line, more) = match rest.find('\n') {
                Some(idx) => (&rest[..=idx], Some(&rest[idx + 1..])),
                None => (rest, None),
            };
            if line.is_empty() {
                out.push(Vec::new());
            } else {
                let ranges = lines.highlight_line(line, syntaxes)?;
                out.push(to_styled_line(&ranges));
            }
            match more {
                Some(next) => rest = next,
                None => break,
            }
        }

        Ok(out)
    }

    /// Highlights a single line independently, as 24-bit ANSI escaped text.
    ///
    /// # Errors
    /// Returns [`HighlightError`] if the tokenizer rejects the line.
    pub fn highlight_ansi_line(&self, line: &str) -> Result<String, HighlightError> {
        let mut lines = HighlightLines::new(self.syntax, &self.theme);
        let with_newline = format!("{line}\n");
        let ranges = lines.highlight_line(&with_newline, syntax_set())?;
        let trimmed: Vec<(Style, &str)> = ranges
            .into_iter()
            .map(|(style, text)| (style, strip_line_ending(text)))
            .filter(|(_, text)| !text.is_empty())
            .collect();
        let mut escaped = syntect::util::as_24_bit_terminal_escaped(&trimmed, false);
        escaped.push_str("\x1b[0m");
        Ok(escaped)
    }
}

fn strip_line_ending(text: &str) -> &str {
    text.trim_end_matches(['\n', '\r'])
}

fn to_styled_line(ranges: &[(Style, &str)]) -> StyledLine {
    ranges
        .iter()
        .filter_map(|(style, text)| {
            let text = strip_line_ending(text);
            (!text.is_empty()).then(|| StyledSpan {
                text: text.to_string(),
                style: SpanStyle::from(*style),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::themes::ThemeRegistry;

    fn highlighter(path: &str) -> Highlighter {
        let theme = ThemeRegistry::load(None)
            .unwrap()
            .get("base16-ocean.dark")
            .unwrap();
        Highlighter::for_path(&PathBuf::from(path), theme)
    }

    fn plain_text(line: &StyledLine) -> String {
        line.iter().map(|span| span.text.as_str()).collect()
    }

    #[test]
    fn test_language_from_extension() {
        let h = highlighter("src/main.rs");
        assert_eq!(h.language(), "Rust");
        assert!(!h.is_fallback());
    }

    #[test]
    fn test_unknown_extension_uses_fallback() {
        let h = highlighter("notes.zzunknown");
        assert!(h.is_fallback());
        assert_eq!(h.language(), "Plain Text");

        let lines = h.highlight("just some words\nand more").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(plain_text(&lines[0]), "just some words");
        assert_eq!(plain_text(&lines[1]), "and more");
    }

    #[test]
    fn test_line_count_matches_newlines() {
        let h = highlighter("main.rs");
        assert_eq!(h.highlight("").unwrap().len(), 1);
        assert_eq!(h.highlight("fn").unwrap().len(), 1);
        assert_eq!(h.highlight("fn main() {\n").unwrap().len(), 2);
        assert_eq!(h.highlight("a\n\nb").unwrap().len(), 3);
    }

    #[test]
    fn test_spans_preserve_text_and_drop_newlines() {
        let h = highlighter("main.rs");
        let source = "fn main() {\n    let x = 1;\n}";
        let lines = h.highlight(source).unwrap();
        let joined: Vec<String> = lines.iter().map(plain_text).collect();
        assert_eq!(joined.join("\n"), source);
        assert!(
            lines
                .iter()
                .flatten()
                .all(|span| !span.text.contains('\n'))
        );
    }

    #[test]
    fn test_keywords_get_a_distinct_color() {
        let h = highlighter("main.rs");
        let lines = h.highlight("fn main").unwrap();
        let colors: Vec<_> = lines[0].iter().map(|s| s.style.foreground).collect();
        assert!(colors.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_partial_prefix_highlights() {
        let h = highlighter("main.rs");
        // An unterminated string literal is a normal reveal state.
        let lines = h.highlight("let s = \"unterminated").unwrap();
        assert_eq!(plain_text(&lines[0]), "let s = \"unterminated");
    }

    #[test]
    fn test_ansi_line_has_escapes_and_reset() {
        let h = highlighter("main.rs");
        let out = h.highlight_ansi_line("let x = 1;").unwrap();
        assert!(out.contains("\x1b[38;2;"));
        assert!(out.ends_with("\x1b[0m"));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_crlf_is_stripped() {
        let h = highlighter("notes.txt");
        let lines = h.highlight("one\r\ntwo").unwrap();
        assert_eq!(plain_text(&lines[0]), "one");
    }

    #[test]
    fn test_error_displays_its_message() {
        assert_eq!(HighlightError::new("bad input").to_string(), "bad input");
    }
}
