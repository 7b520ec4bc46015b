//! Primary error enum for registry, stack and source failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::Location;

/// Convenience alias for results carrying a [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the configuration engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A layer name did not match any known [`Location`].
    #[error("invalid config location `{name}`")]
    InvalidLocation {
        /// Name that failed to parse.
        name: String,
    },

    /// A consumer asked for a key that the registry does not define.
    #[error("unknown configuration key `{key}`")]
    UnknownKey {
        /// Key that was requested.
        key: String,
    },

    /// Two definitions share the same key.
    #[error("configuration key `{key}` is defined more than once")]
    DuplicateDefinition {
        /// Key defined twice.
        key: String,
    },

    /// A definition's default value fails its own validator.
    #[error("default for `{key}` is invalid: {message}")]
    InvalidDefault {
        /// Key whose default was rejected.
        key: String,
        /// Validator message explaining the rejection.
        message: String,
    },

    /// A precedence table lists the same location twice.
    #[error("location `{location}` appears more than once in the precedence table")]
    DuplicateLocation {
        /// Repeated location.
        location: Location,
    },

    /// A layer was added for a location the precedence table does not rank.
    #[error("location `{location}` has no rank in the precedence table")]
    UnrankedLocation {
        /// Location without a rank.
        location: Location,
    },

    /// A layer was added for a location that already has one.
    #[error("a layer for location `{location}` is already present")]
    DuplicateLayer {
        /// Location already occupied.
        location: Location,
    },

    /// A layer validated against another registry was added to a stack.
    #[error("layer `{location}` was validated against a different registry")]
    ForeignRegistry {
        /// Location of the rejected layer.
        location: Location,
    },

    /// A configuration file could not be read or parsed.
    #[error("configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying error reported by the reader or parser.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An effective value could not be deserialised into the requested type.
    #[error("configuration value `{key}` has an unexpected shape: {source}")]
    Conversion {
        /// Key whose value failed to convert.
        key: String,
        /// Underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
}
