//! Static description of one configuration key.

use std::borrow::Cow;

use serde_json::Value;

use super::Validator;
use crate::{Location, LocationSet};

/// Description of one recognised configuration key.
///
/// Definitions are assembled with a small builder and frozen inside a
/// [`crate::Registry`].
///
/// # Examples
///
/// ```
/// use layered_config::{Definition, Location, LocationSet, Validator, ValueType};
/// use serde_json::json;
///
/// let global = Definition::new("global", json!(false), Validator::Type(ValueType::Boolean))
///     .allowed_on(LocationSet::of(&[Location::Cli, Location::Env]))
///     .describe("Operate in global mode.");
/// assert!(global.is_allowed_on(Location::Cli));
/// assert!(!global.is_allowed_on(Location::Project));
/// ```
#[derive(Clone, Debug)]
pub struct Definition {
    key: Cow<'static, str>,
    default: Value,
    validator: Validator,
    deprecated: Option<Cow<'static, str>>,
    allowed: LocationSet,
    description: Cow<'static, str>,
}

impl Definition {
    /// Create a definition allowed on every layer.
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>, default: Value, validator: Validator) -> Self {
        Self {
            key: key.into(),
            default,
            validator,
            deprecated: None,
            allowed: LocationSet::ALL,
            description: Cow::Borrowed(""),
        }
    }

    /// Restrict the layers this key may be set on.
    #[must_use]
    pub fn allowed_on(mut self, allowed: LocationSet) -> Self {
        self.allowed = allowed;
        self
    }

    /// Mark the key as deprecated with an explanatory note.
    #[must_use]
    pub fn deprecated(mut self, note: impl Into<Cow<'static, str>>) -> Self {
        self.deprecated = Some(note.into());
        self
    }

    /// Attach a one-line description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    /// The key name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value used when no layer sets the key.
    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default
    }

    /// Validator applied to raw values.
    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Deprecation note, when the key is deprecated.
    #[must_use]
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    /// Layers the key may be set on.
    #[must_use]
    pub const fn allowed(&self) -> LocationSet {
        self.allowed
    }

    /// Returns `true` when the key may be set on `location`.
    #[must_use]
    pub const fn is_allowed_on(&self, location: Location) -> bool {
        self.allowed.contains(location)
    }

    /// One-line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the default with its validated form.
    pub(super) fn normalise_default(&mut self) -> Result<(), String> {
        self.default = self.check(&self.default)?;
        Ok(())
    }

    /// Validate and coerce `raw` with this key's validator.
    ///
    /// # Errors
    ///
    /// Returns the validator's requirement message on rejection.
    pub fn check(&self, raw: &Value) -> Result<Value, String> {
        self.validator.validate(raw)
    }
}
