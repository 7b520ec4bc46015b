//! Catalogue of every recognised configuration key.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde_json::{Map, Value};

use super::{Definition, builtin};
use crate::{ConfigError, ConfigResult};

static BUILTIN: LazyLock<Registry> =
    LazyLock::new(|| Registry::from_trusted(builtin::definitions()));

/// Read-only catalogue of [`Definition`]s keyed by name.
///
/// Registries are immutable once built and are safe to share between threads.
///
/// # Examples
///
/// ```
/// use layered_config::Registry;
///
/// let registry = Registry::builtin();
/// let access = registry.lookup("access").expect("access is a builtin key");
/// assert!(access.default_value().is_null());
/// assert!(registry.lookup("colour").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    definitions: BTreeMap<String, Definition>,
}

impl Registry {
    /// Build a registry, checking the table for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateDefinition`] when two definitions share
    /// a key and [`ConfigError::InvalidDefault`] when a default fails its own
    /// validator. Accepted defaults are stored in their coerced form, the same
    /// form a layer would store.
    pub fn new(definitions: impl IntoIterator<Item = Definition>) -> ConfigResult<Self> {
        let mut table = BTreeMap::new();
        for mut definition in definitions {
            if let Err(message) = definition.normalise_default() {
                return Err(ConfigError::InvalidDefault {
                    key: definition.key().to_owned(),
                    message,
                });
            }
            let key = definition.key().to_owned();
            if table.insert(key.clone(), definition).is_some() {
                return Err(ConfigError::DuplicateDefinition { key });
            }
        }
        Ok(Self { definitions: table })
    }

    /// Build from a table known to be consistent.
    fn from_trusted(definitions: Vec<Definition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.key().to_owned(), definition))
                .collect(),
        }
    }

    /// The process-wide registry of package-manager settings.
    ///
    /// Built lazily on first use and never mutated afterwards.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Look up the definition for `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Definition> {
        self.definitions.get(key)
    }

    /// Look up the definition for `key`, failing for unknown keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] when `key` is not defined.
    pub fn require(&self, key: &str) -> ConfigResult<&Definition> {
        self.lookup(key).ok_or_else(|| ConfigError::unknown_key(key))
    }

    /// Returns `true` when `key` is defined.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    /// Iterate over definitions in key order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    /// Iterate over defined keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// Map of every key to its default value.
    #[must_use]
    pub fn defaults(&self) -> Map<String, Value> {
        self.definitions
            .iter()
            .map(|(key, definition)| (key.clone(), definition.default_value().clone()))
            .collect()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` when the registry defines no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
