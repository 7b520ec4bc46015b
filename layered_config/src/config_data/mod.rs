//! Per-layer store of validated configuration values.

use std::fmt;

use serde_json::{Map, Value};

use crate::{
    ConfigResult, Definition, Location, Registry, Warning, WarningKind, WarningSink,
};

/// Outcome counts of one [`ConfigData::load`] call.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadReport {
    /// Entries written to the layer.
    pub accepted: usize,
    /// Entries dropped with a warning.
    pub rejected: usize,
    /// Accepted entries whose key is deprecated.
    pub deprecated: usize,
}

impl LoadReport {
    /// Returns `true` when every entry was accepted.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Values accepted for one configuration layer.
///
/// Every key held by a store passed its definition's validator and is
/// allowed on the store's [`Location`]. Loads are additive: later loads
/// overwrite keys they mention and leave the others untouched.
///
/// # Examples
///
/// ```
/// use layered_config::{ConfigData, Location};
/// use serde_json::{Map, json};
///
/// let mut raw = Map::new();
/// raw.insert("tag".into(), json!("next"));
/// raw.insert("fetch-retries".into(), json!("5"));
///
/// let mut warnings: Vec<layered_config::Warning> = Vec::new();
/// let mut env = ConfigData::new(Location::Env);
/// let report = env.load(raw, &mut warnings);
///
/// assert_eq!(report.accepted, 2);
/// assert!(warnings.is_empty());
/// assert_eq!(env.get("fetch-retries"), Some(&json!(5)));
/// ```
#[derive(Clone)]
pub struct ConfigData<'r> {
    location: Location,
    registry: &'r Registry,
    source: Option<String>,
    data: Map<String, Value>,
}

impl ConfigData<'static> {
    /// Create an empty store for `location` on the builtin registry.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self::with_registry(location, Registry::builtin())
    }

    /// Create an empty store from a layer name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidLocation`] when `name` is not a
    /// recognised layer.
    pub fn for_layer(name: &str) -> ConfigResult<Self> {
        name.parse().map(Self::new)
    }
}

impl<'r> ConfigData<'r> {
    /// Create an empty store for `location` validated against `registry`.
    #[must_use]
    pub fn with_registry(location: Location, registry: &'r Registry) -> Self {
        Self {
            location,
            registry,
            source: None,
            data: Map::new(),
        }
    }

    /// Layer this store holds values for.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Registry the store validates against.
    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Where the values came from, such as a file path.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Record where the values came from.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    /// Validate and merge `raw` into the layer.
    ///
    /// Entries are processed in the mapping's own order and independently of
    /// each other. Each rejected entry emits exactly one warning to `sink`;
    /// accepted entries of deprecated keys emit a deprecation warning.
    pub fn load<I, K>(&mut self, raw: I, sink: &mut dyn WarningSink) -> LoadReport
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut report = LoadReport::default();
        for (raw_key, value) in raw {
            let key: String = raw_key.into();
            match self.admit(&key, &value) {
                Ok((definition, coerced)) => {
                    report.accepted += 1;
                    if let Some(note) = definition.deprecation() {
                        report.deprecated += 1;
                        sink.emit(Warning::new(
                            key.clone(),
                            value,
                            WarningKind::Deprecated {
                                note: note.to_owned(),
                            },
                        ));
                    }
                    self.data.insert(key, coerced);
                }
                Err(kind) => {
                    report.rejected += 1;
                    sink.emit(Warning::new(key, value, kind));
                }
            }
        }
        tracing::debug!(
            location = %self.location,
            accepted = report.accepted,
            rejected = report.rejected,
            "loaded configuration layer"
        );
        report
    }

    /// Decide whether `raw` may be stored under `key` on this layer.
    fn admit(&self, key: &str, raw: &Value) -> Result<(&'r Definition, Value), WarningKind> {
        let definition = self
            .registry
            .lookup(key)
            .ok_or(WarningKind::UnknownKey)?;
        if !definition.is_allowed_on(self.location) {
            return Err(WarningKind::DisallowedLayer {
                location: self.location,
            });
        }
        definition
            .check(raw)
            .map(|coerced| (definition, coerced))
            .map_err(|reason| WarningKind::InvalidValue { reason })
    }

    /// Accepted values for this layer.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Accepted value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns `true` when the layer holds a value for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Number of accepted keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no key has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for ConfigData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigData")
            .field("location", &self.location)
            .field("source", &self.source)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
