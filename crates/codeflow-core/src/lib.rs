//! Core codeflow library (config, themes, highlighting, process plumbing).

pub mod config;
pub mod highlight;
pub mod interrupt;
pub mod logging;
pub mod themes;
