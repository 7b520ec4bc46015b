//! Library half of the `pm-config` binary.
//!
//! Parsing, loading and rendering live here so they can be tested without
//! spawning the executable.

pub mod cli;
pub mod error;
pub mod render;
