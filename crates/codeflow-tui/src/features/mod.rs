//! Feature slices of the reveal engine.

pub mod cursor;
pub mod progress;
pub mod reveal;
pub mod viewport;
