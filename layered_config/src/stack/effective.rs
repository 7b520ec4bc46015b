//! Immutable snapshot of the effective configuration.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Value, json};

use super::Origin;
use crate::{ConfigError, ConfigResult};

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    value: Value,
    origin: Origin,
}

/// Every registry key mapped to its effective value and origin.
///
/// Produced by [`crate::ConfigStack::resolve_all`]; consumers treat it as
/// read-only for the duration of one command. Serialises as a map of
/// effective values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectiveConfig {
    entries: BTreeMap<String, Entry>,
}

impl EffectiveConfig {
    pub(super) fn from_entries(entries: impl Iterator<Item = (String, Value, Origin)>) -> Self {
        Self {
            entries: entries
                .map(|(key, value, origin)| (key, Entry { value, origin }))
                .collect(),
        }
    }

    /// Effective value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] when `key` is not part of the
    /// snapshot.
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        self.entries
            .get(key)
            .map(|entry| &entry.value)
            .ok_or_else(|| ConfigError::unknown_key(key))
    }

    /// Effective value of `key`, deserialised into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys outside the snapshot and
    /// [`ConfigError::Conversion`] when the value does not fit `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::ConfigStack;
    ///
    /// let effective = ConfigStack::standard().resolve_all();
    /// let retries: u32 = effective.get_as("fetch-retries")?;
    /// let omit: Vec<String> = effective.get_as("omit")?;
    /// assert_eq!(retries, 2);
    /// assert!(omit.is_empty());
    /// # Ok::<_, layered_config::ConfigError>(())
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        let value = self.get(key)?.clone();
        serde_json::from_value(value).map_err(|source| ConfigError::Conversion {
            key: key.to_owned(),
            source,
        })
    }

    /// Origin of the effective value for `key`.
    #[must_use]
    pub fn origin(&self, key: &str) -> Option<Origin> {
        self.entries.get(key).map(|entry| entry.origin)
    }

    /// Iterate over `(key, value, origin)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value, Origin)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.value, entry.origin))
    }

    /// Entries supplied by a loaded layer rather than a default.
    pub fn explicit(&self) -> impl Iterator<Item = (&str, &Value, Origin)> {
        self.iter()
            .filter(|(_, _, origin)| *origin != Origin::Default)
    }

    /// Number of keys in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the snapshot holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot as a JSON object of effective values.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value, _)| (key.to_owned(), value.clone()))
                .collect(),
        )
    }

    /// The snapshot as a JSON object of `{"value": .., "origin": ..}` records.
    #[must_use]
    pub fn to_annotated_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value, origin)| {
                    (key.to_owned(), json!({ "value": value, "origin": origin }))
                })
                .collect(),
        )
    }
}

impl Serialize for EffectiveConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, &entry.value)?;
        }
        map.end()
    }
}
