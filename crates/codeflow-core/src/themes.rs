//! Highlighting theme discovery.
//!
//! Bundled themes come from syntect's default set. User themes are
//! `*.tmTheme` files placed in the themes directory (see
//! [`crate::config::paths::themes_dir`]); a user theme shadows a bundled
//! theme of the same name.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
pub use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;

/// File extension of user theme files.
pub const THEME_EXTENSION: &str = "tmTheme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    Unknown { name: String },
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::Unknown { name } => write!(
                f,
                "Theme '{name}' not found. Use '--list-themes' to see available themes"
            ),
        }
    }
}

impl std::error::Error for ThemeError {}

/// Bundled plus user themes, keyed by name.
#[derive(Debug)]
pub struct ThemeRegistry {
    bundled: BTreeMap<String, Theme>,
    user: BTreeMap<String, Theme>,
}

impl ThemeRegistry {
    /// Loads bundled themes and, when `user_dir` exists, the user themes in it.
    ///
    /// # Errors
    /// Returns an error if the user directory cannot be listed or a theme
    /// file in it is malformed.
    pub fn load(user_dir: Option<&Path>) -> Result<Self> {
        let bundled = ThemeSet::load_defaults().themes;
        let user = match user_dir {
            Some(dir) if dir.is_dir() => load_user_themes(dir)?,
            _ => BTreeMap::new(),
        };
        tracing::debug!(
            bundled = bundled.len(),
            user = user.len(),
            "theme registry loaded"
        );
        Ok(Self { bundled, user })
    }

    pub fn bundled_names(&self) -> impl Iterator<Item = &str> {
        self.bundled.keys().map(String::as_str)
    }

    pub fn user_names(&self) -> impl Iterator<Item = &str> {
        self.user.keys().map(String::as_str)
    }

    /// All theme names: bundled first, then user themes.
    pub fn names(&self) -> Vec<&str> {
        self.bundled_names().chain(self.user_names()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.user.contains_key(name) || self.bundled.contains_key(name)
    }

    /// Looks up a theme by name, preferring user themes.
    ///
    /// # Errors
    /// Returns [`ThemeError::Unknown`] when no theme has this name.
    pub fn get(&self, name: &str) -> Result<Theme, ThemeError> {
        self.user
            .get(name)
            .or_else(|| self.bundled.get(name))
            .cloned()
            .ok_or_else(|| ThemeError::Unknown {
                name: name.to_string(),
            })
    }
}

fn load_user_themes(dir: &Path) -> Result<BTreeMap<String, Theme>> {
    let mut themes = BTreeMap::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read theme directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(THEME_EXTENSION)
        {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let theme = ThemeSet::get_theme(&path)
            .with_context(|| format!("Failed to load theme {}", path.display()))?;
        themes.insert(name.to_string(), theme);
    }

    Ok(themes)
}
