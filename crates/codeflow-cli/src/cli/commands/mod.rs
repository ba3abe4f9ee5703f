//! CLI command handlers.

pub mod show;
pub mod themes;
