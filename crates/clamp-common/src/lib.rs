//! Common utilities for the clamp workspace.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - deduplicated, colored stderr output for unsupported input
//! - **Console** - the informational log sink the truncation runtime writes to

pub mod console;
pub mod warning;
