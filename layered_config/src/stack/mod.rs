//! Merge engine resolving effective values over an ordered stack of layers.

mod effective;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::{ConfigData, ConfigError, ConfigResult, Location, Precedence, Registry};

pub use effective::EffectiveConfig;

/// Where an effective value came from.
///
/// Serialises as the layer name, or `default`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Origin {
    /// A loaded layer held the value.
    Layer(Location),
    /// No layer held the value; the registry default applies.
    Default,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(location) => write!(f, "{location}"),
            Self::Default => f.write_str("default"),
        }
    }
}

impl Serialize for Origin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An effective value together with its origin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Resolved<'a> {
    /// The winning value.
    pub value: &'a Value,
    /// Layer that supplied it.
    pub origin: Origin,
}

/// Ordered set of [`ConfigData`] layers resolved by a fixed [`Precedence`].
///
/// # Examples
///
/// ```
/// use layered_config::{ConfigData, ConfigStack, Location, Origin};
/// use serde_json::json;
///
/// let mut warnings: Vec<layered_config::Warning> = Vec::new();
/// let mut stack = ConfigStack::standard();
/// stack.insert_layer(ConfigData::new(Location::Cli))?;
/// stack.insert_layer(ConfigData::new(Location::Project))?;
///
/// if let Some(project) = stack.layer_mut(Location::Project) {
///     project.load([("tag", json!("next"))], &mut warnings);
/// }
/// if let Some(cli) = stack.layer_mut(Location::Cli) {
///     cli.load([("tag", json!("beta"))], &mut warnings);
/// }
///
/// let tag = stack.resolve("tag")?;
/// assert_eq!(tag.value, &json!("beta"));
/// assert_eq!(tag.origin, Origin::Layer(Location::Cli));
/// assert_eq!(stack.get("fund")?, &json!(true));
/// # Ok::<_, layered_config::ConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConfigStack<'r> {
    registry: &'r Registry,
    precedence: Precedence,
    /// Kept sorted highest precedence first.
    layers: Vec<ConfigData<'r>>,
}

impl ConfigStack<'static> {
    /// Empty stack over the builtin registry with the standard precedence.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Registry::builtin(), Precedence::standard())
    }
}

impl<'r> ConfigStack<'r> {
    /// Create an empty stack.
    #[must_use]
    pub fn new(registry: &'r Registry, precedence: Precedence) -> Self {
        Self {
            registry,
            precedence,
            layers: Vec::new(),
        }
    }

    /// Build a stack from already loaded layers.
    ///
    /// # Errors
    ///
    /// See [`Self::insert_layer`].
    pub fn with_layers(
        registry: &'r Registry,
        precedence: Precedence,
        layers: impl IntoIterator<Item = ConfigData<'r>>,
    ) -> ConfigResult<Self> {
        let mut stack = Self::new(registry, precedence);
        for layer in layers {
            stack.insert_layer(layer)?;
        }
        Ok(stack)
    }

    /// Add a layer, placing it by its precedence rank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ForeignRegistry`] when the layer was validated
    /// against another registry, [`ConfigError::UnrankedLocation`] when the
    /// precedence table does not rank the layer's location and
    /// [`ConfigError::DuplicateLayer`] when that location already has a layer.
    pub fn insert_layer(&mut self, layer: ConfigData<'r>) -> ConfigResult<()> {
        let location = layer.location();
        if !std::ptr::eq(layer.registry(), self.registry) {
            return Err(ConfigError::ForeignRegistry { location });
        }
        let Some(rank) = self.precedence.rank(location) else {
            return Err(ConfigError::UnrankedLocation { location });
        };
        if self.layer(location).is_some() {
            return Err(ConfigError::DuplicateLayer { location });
        }
        let index = self
            .layers
            .iter()
            .position(|existing| {
                self.precedence
                    .rank(existing.location())
                    .is_some_and(|existing_rank| existing_rank > rank)
            })
            .unwrap_or(self.layers.len());
        self.layers.insert(index, layer);
        Ok(())
    }

    /// The layer for `location`, if one was added.
    #[must_use]
    pub fn layer(&self, location: Location) -> Option<&ConfigData<'r>> {
        self.layers.iter().find(|layer| layer.location() == location)
    }

    /// Mutable access to the layer for `location`, for further loads.
    pub fn layer_mut(&mut self, location: Location) -> Option<&mut ConfigData<'r>> {
        self.layers
            .iter_mut()
            .find(|layer| layer.location() == location)
    }

    /// Layers from highest to lowest precedence.
    pub fn layers(&self) -> impl Iterator<Item = &ConfigData<'r>> {
        self.layers.iter()
    }

    /// Registry values are validated and defaulted against.
    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Precedence table in force.
    #[must_use]
    pub const fn precedence(&self) -> &Precedence {
        &self.precedence
    }

    /// Resolve the effective value of `key`.
    ///
    /// The highest-precedence layer holding `key` wins; otherwise the
    /// registry default applies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] when the registry does not define
    /// `key`, whatever the layers contain.
    pub fn resolve(&self, key: &str) -> ConfigResult<Resolved<'_>> {
        let definition = self.registry.require(key)?;
        Ok(self.layer_value(key).unwrap_or(Resolved {
            value: definition.default_value(),
            origin: Origin::Default,
        }))
    }

    /// Highest-precedence layer value for `key`, ignoring defaults.
    fn layer_value(&self, key: &str) -> Option<Resolved<'_>> {
        self.layers.iter().find_map(|layer| {
            layer.get(key).map(|value| Resolved {
                value,
                origin: Origin::Layer(layer.location()),
            })
        })
    }

    /// Effective value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys the registry does not
    /// define.
    pub fn get(&self, key: &str) -> ConfigResult<&Value> {
        self.resolve(key).map(|resolved| resolved.value)
    }

    /// Layer that supplies `key`, or `None` when the default applies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys the registry does not
    /// define.
    pub fn find(&self, key: &str) -> ConfigResult<Option<Location>> {
        self.resolve(key).map(|resolved| match resolved.origin {
            Origin::Layer(location) => Some(location),
            Origin::Default => None,
        })
    }

    /// Returns `true` when no layer sets `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys the registry does not
    /// define.
    pub fn is_default(&self, key: &str) -> ConfigResult<bool> {
        self.find(key).map(|location| location.is_none())
    }

    /// Snapshot of every registry key's effective value.
    #[must_use]
    pub fn resolve_all(&self) -> EffectiveConfig {
        EffectiveConfig::from_entries(self.registry.definitions().map(|definition| {
            let key = definition.key();
            let resolved = self.layer_value(key).unwrap_or(Resolved {
                value: definition.default_value(),
                origin: Origin::Default,
            });
            (key.to_owned(), resolved.value.clone(), resolved.origin)
        }))
    }
}
