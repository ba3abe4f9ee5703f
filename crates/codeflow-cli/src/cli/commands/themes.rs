//! Theme listing.

use std::io::Write;

use anyhow::Result;
use codeflow_core::themes::ThemeRegistry;

/// Prints `- <name>` for every bundled theme, then every user theme.
pub fn list(registry: &ThemeRegistry, out: &mut impl Write) -> Result<()> {
    for name in registry.names() {
        writeln!(out, "- {name}")?;
    }
    Ok(())
}
