//! Collectors turning external sources into flat raw mappings.
//!
//! Sources never validate: they hand `key -> raw value` mappings to
//! [`crate::ConfigData::load`], which decides what is accepted.

mod env;
mod file;

pub use env::{DEFAULT_ENV_PREFIX, env_layer, env_layer_from};
pub use file::{load_file_layer, read_layer_file};
