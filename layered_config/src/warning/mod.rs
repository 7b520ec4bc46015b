//! Structured warnings raised while loading layers.
//!
//! Every rejected entry produces exactly one [`Warning`], delivered inline
//! to the [`WarningSink`] handed to [`crate::ConfigData::load`]. Sinks only
//! receive records; rendering is left to whoever owns the sink.

mod channel;
mod sink;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::Location;

pub use channel::{LogChannel, Subscription};
pub use sink::{TracingSink, WarningSink};

/// Severity attached to a [`Warning`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// A failure worth interrupting the user for.
    Error,
    /// Input was ignored or is deprecated.
    Warn,
    /// Informational notice.
    Info,
}

impl LogLevel {
    /// Lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an entry was reported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WarningKind {
    /// The key is not in the registry; the entry was dropped.
    UnknownKey,
    /// The key may not be set on this layer; the entry was dropped.
    DisallowedLayer {
        /// Layer the entry was loaded into.
        location: Location,
    },
    /// The value failed the key's validator; the entry was dropped.
    InvalidValue {
        /// Validator message describing the requirement.
        reason: String,
    },
    /// The entry was accepted but the key is deprecated.
    Deprecated {
        /// Deprecation note from the definition.
        note: String,
    },
}

impl WarningKind {
    /// Returns `true` when the entry was dropped.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        !matches!(self, Self::Deprecated { .. })
    }
}

/// One structured warning record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Warning {
    level: LogLevel,
    key: String,
    raw: Value,
    #[serde(flatten)]
    kind: WarningKind,
}

impl Warning {
    /// Subsystem tag attached to every configuration warning.
    pub const SUBSYSTEM: &'static str = "config";

    /// Build a warning at [`LogLevel::Warn`].
    #[must_use]
    pub fn new(key: impl Into<String>, raw: Value, kind: WarningKind) -> Self {
        Self {
            level: LogLevel::Warn,
            key: key.into(),
            raw,
            kind,
        }
    }

    /// Override the severity.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Severity of the record.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Key the record is about.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw value as it was supplied.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Reason for the record.
    #[must_use]
    pub const fn kind(&self) -> &WarningKind {
        &self.kind
    }

    /// Human-readable message, without level or subsystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::{Location, Warning, WarningKind};
    /// use serde_json::json;
    ///
    /// let warning = Warning::new(
    ///     "hash-algorithm",
    ///     json!("notok"),
    ///     WarningKind::DisallowedLayer { location: Location::Cli },
    /// );
    /// assert_eq!(
    ///     warning.message(),
    ///     "invalid item `hash-algorithm` set with `notok`, not allowed to be set on config layer `cli`"
    /// );
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        let key = &self.key;
        let raw = RawDisplay(&self.raw);
        match &self.kind {
            WarningKind::UnknownKey => {
                format!("unknown item `{key}` set with `{raw}`, not allowed to be set")
            }
            WarningKind::DisallowedLayer { location } => format!(
                "invalid item `{key}` set with `{raw}`, not allowed to be set on config layer `{location}`"
            ),
            WarningKind::InvalidValue { reason } => {
                format!("invalid item `{key}` set with `{raw}`, {reason}")
            }
            WarningKind::Deprecated { note } => {
                format!("deprecated item `{key}` set with `{raw}`, {note}")
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Strings render bare; everything else renders as JSON.
struct RawDisplay<'a>(&'a Value);

impl fmt::Display for RawDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}
