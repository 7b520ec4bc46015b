//! Layered, validated configuration for a package manager.
//!
//! Settings arrive from several sources, each held in its own layer: the
//! command line, the environment, the project file, the user file, the
//! global file, a builtin file and the registry defaults. Every entry is
//! checked against a static [`Registry`] of definitions before it is stored;
//! bad input becomes a structured [`Warning`] instead of an error. A
//! [`ConfigStack`] resolves each key through an explicit [`Precedence`]
//! table and reports which layer supplied the winning value.
//!
//! ```
//! use layered_config::{ConfigData, ConfigStack, Location};
//! use serde_json::json;
//!
//! let mut warnings: Vec<layered_config::Warning> = Vec::new();
//! let mut cli = ConfigData::new(Location::Cli);
//! cli.load([("loglevel", json!("warn")), ("colour", json!("auto"))], &mut warnings);
//! assert_eq!(
//!     warnings[0].message(),
//!     "unknown item `colour` set with `auto`, not allowed to be set"
//! );
//!
//! let mut stack = ConfigStack::standard();
//! stack.insert_layer(cli)?;
//! assert_eq!(stack.get("loglevel")?, &json!("warn"));
//! assert_eq!(stack.get("tag")?, &json!("latest"));
//! # Ok::<_, layered_config::ConfigError>(())
//! ```
//!
//! [`Loader`] runs the full load sequence over the process environment and
//! configuration files.

mod config_data;
mod definitions;
mod error;
mod loader;
mod location;
mod precedence;
pub mod sources;
mod stack;
mod warning;

pub use config_data::{ConfigData, LoadReport};
pub use definitions::{
    CustomCheck, Definition, Registry, SUPPORTED_HASH_ALGORITHMS, Validator, ValueType,
};
pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_FILE_NAME, LoadOptions, LoadOutcome, Loader};
pub use location::{Location, LocationSet};
pub use precedence::Precedence;
pub use stack::{ConfigStack, EffectiveConfig, Origin, Resolved};
pub use warning::{
    LogChannel, LogLevel, Subscription, TracingSink, Warning, WarningKind, WarningSink,
};
