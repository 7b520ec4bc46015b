//! Error types produced by the configuration engine.
//!
//! Only programmer-facing misuse and unreadable sources are errors. Bad user
//! input (unknown keys, values rejected by a validator, keys set on a layer
//! that may not carry them) is reported through [`crate::Warning`] records
//! instead and never reaches this module.

mod constructors;
mod types;

pub use types::{ConfigError, ConfigResult};

#[cfg(test)]
mod tests;
