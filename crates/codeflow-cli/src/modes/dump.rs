//! Static dump mode.
//!
//! Prints a whole file at once: every line gets a gray, right-aligned line
//! number and is highlighted on its own, so one bad line never takes the
//! rest of the listing down with it.

use std::io::Write;

use anyhow::Result;
use codeflow_core::highlight::Highlighter;

const LINE_NUMBER_COLOR: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Writes the highlighted listing of `content` to `out`.
///
/// # Errors
/// Returns an error only if writing to `out` fails.
pub fn print(content: &str, highlighter: &Highlighter, out: &mut impl Write) -> Result<()> {
    let mut failed = 0usize;
    for (i, line) in content.split('\n').enumerate() {
        write!(out, "{LINE_NUMBER_COLOR}{:5}{RESET} ", i + 1)?;
        match highlighter.highlight_ansi_line(line) {
            Ok(escaped) => writeln!(out, "{escaped}")?,
            Err(err) => {
                failed += 1;
                writeln!(out, "Error tokenizing line: {err}")?;
            }
        }
    }
    if failed > 0 {
        tracing::warn!(failed, "some lines could not be highlighted");
    }
    out.flush()?;
    Ok(())
}
