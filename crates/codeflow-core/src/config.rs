//! Configuration management for codeflow.
//!
//! Loads configuration from ${CODEFLOW_HOME}/config.toml with sensible defaults.
//! Command-line flags override whatever is loaded here; the merged values are
//! frozen into a [`SessionConfig`] before any session starts.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// How files are presented when no mode flag is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Print the whole file highlighted, with line numbers (default)
    #[default]
    Dump,
    /// Reveal automatically on a timer
    Display,
    /// Reveal one character per keystroke
    Interactive,
}

/// Reveal pacing mode of a rendering session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Autoplay,
    Interactive,
}

impl Mode {
    /// Cursor blink cadence for this mode.
    pub fn blink_interval(self) -> Duration {
        match self {
            Mode::Autoplay => Duration::from_millis(250),
            Mode::Interactive => Duration::from_millis(500),
        }
    }

    /// Number of trailing lines kept in the viewport.
    pub fn max_visible_lines(self) -> usize {
        match self {
            Mode::Autoplay => 30,
            Mode::Interactive => 35,
        }
    }
}

/// Rejected typing speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedError(pub i64);

impl std::fmt::Display for SpeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Speed must be greater than 0 (got {})", self.0)
    }
}

impl std::error::Error for SpeedError {}

/// Validated typing speed in characters per second (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(u32);

impl Speed {
    pub const DEFAULT: u32 = 20;
    const BASE_MILLIS: u64 = 1000;

    /// Validates a user supplied speed.
    ///
    /// # Errors
    /// Returns [`SpeedError`] when `value <= 0`.
    pub fn new(value: i64) -> Result<Self, SpeedError> {
        if value <= 0 {
            return Err(SpeedError(value));
        }
        Ok(Self(u32::try_from(value).unwrap_or(u32::MAX)))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Autoplay reveal interval: `max(1, 1000 / speed)` milliseconds.
    pub fn reveal_interval(self) -> Duration {
        let millis = (Self::BASE_MILLIS / u64::from(self.0)).max(1);
        Duration::from_millis(millis)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Immutable settings for one rendering session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub speed: Speed,
}

impl SessionConfig {
    pub fn new(mode: Mode, speed: Speed) -> Self {
        Self { mode, speed }
    }
}

pub mod paths {
    //! Path resolution for codeflow configuration and data directories.
    //!
    //! CODEFLOW_HOME resolution order:
    //! 1. CODEFLOW_HOME environment variable (if set)
    //! 2. ~/.config/codeflow (default)
    //! 3. ./.codeflow when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the codeflow home directory.
    pub fn codeflow_home() -> PathBuf {
        if let Ok(home) = std::env::var("CODEFLOW_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".codeflow"),
            |h| h.join(".config").join("codeflow"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        codeflow_home().join("config.toml")
    }

    /// Returns the user theme directory (`*.tmTheme` files).
    pub fn themes_dir() -> PathBuf {
        codeflow_home().join("themes")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        codeflow_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Highlighting theme name
    pub theme: String,

    /// Typing speed for display mode, in characters per second (1-1000)
    pub speed: i64,

    /// Presentation used when no mode flag is passed
    pub mode: ModeSetting,
}

impl Config {
    pub const DEFAULT_THEME: &str = "base16-ocean.dark";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Self::DEFAULT_THEME.to_string(),
            speed: i64::from(Speed::DEFAULT),
            mode: ModeSetting::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, "base16-ocean.dark");
        assert_eq!(config.speed, 20);
        assert_eq!(config.mode, ModeSetting::Dump);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "speed = 100\nmode = \"interactive\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.speed, 100);
        assert_eq!(config.mode, ModeSetting::Interactive);
        assert_eq!(config.theme, Config::DEFAULT_THEME);
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "speed = \"fast\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_speed_rejects_non_positive() {
        assert_eq!(Speed::new(0), Err(SpeedError(0)));
        assert_eq!(Speed::new(-5), Err(SpeedError(-5)));
        assert_eq!(
            SpeedError(0).to_string(),
            "Speed must be greater than 0 (got 0)"
        );
    }

    #[test]
    fn test_reveal_interval_is_thousand_over_speed() {
        for (speed, millis) in [(1, 1000), (3, 333), (20, 50), (1000, 1), (5000, 1)] {
            let interval = Speed::new(speed).unwrap().reveal_interval();
            assert_eq!(interval, Duration::from_millis(millis), "speed {speed}");
        }
    }

    #[test]
    fn test_reveal_interval_never_below_one_millisecond() {
        for speed in 1..=2000 {
            let interval = Speed::new(speed).unwrap().reveal_interval();
            assert!(interval >= Duration::from_millis(1));
        }
    }

    #[test]
    fn test_mode_constants() {
        assert_eq!(Mode::Autoplay.blink_interval(), Duration::from_millis(250));
        assert_eq!(
            Mode::Interactive.blink_interval(),
            Duration::from_millis(500)
        );
        assert_eq!(Mode::Autoplay.max_visible_lines(), 30);
        assert_eq!(Mode::Interactive.max_visible_lines(), 35);
    }

    #[test]
    fn test_default_speed() {
        assert_eq!(Speed::default().get(), 20);
        assert_eq!(Speed::default().reveal_interval(), Duration::from_millis(50));
    }
}
