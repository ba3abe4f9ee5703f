//! File logging for codeflow.
//!
//! The TUI owns stdout while a session runs, so tracing output goes to
//! `<log_dir>/codeflow.log` and only when `CODEFLOW_LOG` holds a filter
//! directive (e.g. `CODEFLOW_LOG=codeflow_tui=debug`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CODEFLOW_LOG";

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "codeflow.log";

/// Installs the global subscriber when `CODEFLOW_LOG` is set.
///
/// Keep the returned guard alive for the whole program; dropping it flushes
/// and stops the background writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the filter
/// directive does not parse.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Ok(directive) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    init_in(&paths::log_dir(), &directive)
}

/// Installs the global subscriber writing into `dir`.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the filter
/// directive does not parse.
pub fn init_in(dir: &Path, directive: &str) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("Invalid {LOG_ENV} filter '{directive}'"))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A global subscriber is already installed; the guard is dropped
        // so the unused writer shuts down.
        Err(_) => Ok(None),
    }
}
