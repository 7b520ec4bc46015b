//! Value validators attached to configuration definitions.
//!
//! Validators both check and coerce: environment variables and CLI flags
//! arrive as strings, so `"true"` is accepted for a boolean key and stored
//! as `true`.

use serde_json::{Number, Value};

/// Primitive value shapes understood by [`Validator::Type`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueType {
    /// `true` or `false`.
    Boolean,
    /// Any string; numbers and booleans are stringified.
    String,
    /// Any finite number.
    Number,
    /// Integral numbers only.
    Integer,
    /// Non-empty filesystem path.
    Path,
    /// Absolute `http` or `https` URL.
    Url,
}

impl ValueType {
    /// Message attached to warnings for values of the wrong shape.
    #[must_use]
    pub const fn requirement(self) -> &'static str {
        match self {
            Self::Boolean => "Must be a boolean value (true or false)",
            Self::String => "Must be a string",
            Self::Number => "Must be a numeric value",
            Self::Integer => "Must be an integer",
            Self::Path => "Must be a valid filesystem path",
            Self::Url => r#"Must be a full url with "http://""#,
        }
    }

    fn coerce(self, raw: &Value) -> Option<Value> {
        match self {
            Self::Boolean => coerce_bool(raw),
            Self::String => match raw {
                Value::String(_) => Some(raw.clone()),
                Value::Number(n) => Some(Value::String(n.to_string())),
                Value::Bool(b) => Some(Value::String(b.to_string())),
                Value::Null | Value::Array(_) | Value::Object(_) => None,
            },
            Self::Number => coerce_number(raw),
            Self::Integer => coerce_number(raw).filter(|n| n.is_i64() || n.is_u64()),
            Self::Path => raw
                .as_str()
                .filter(|path| !path.trim().is_empty())
                .map(|_| raw.clone()),
            Self::Url => raw
                .as_str()
                .and_then(|text| url::Url::parse(text).ok())
                .filter(|parsed| matches!(parsed.scheme(), "http" | "https"))
                .map(|_| raw.clone()),
        }
    }
}

fn coerce_bool(raw: &Value) -> Option<Value> {
    match raw {
        Value::Bool(_) => Some(raw.clone()),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_number(raw: &Value) -> Option<Value> {
    match raw {
        Value::Number(_) => Some(raw.clone()),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Some(Value::from(int));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        _ => None,
    }
}

/// Checks a value and returns the normalised form.
pub type CustomCheck = fn(&Value) -> Result<Value, String>;

/// Rule a raw value must satisfy before a layer accepts it.
#[derive(Clone, Debug)]
pub enum Validator {
    /// Shape check with string coercion.
    Type(ValueType),
    /// Membership in an enumerated set of allowed values.
    OneOf(Vec<Value>),
    /// Boolean predicate; `description` becomes the warning message.
    Predicate {
        /// Message explaining what the predicate requires.
        description: &'static str,
        /// The predicate itself.
        check: fn(&Value) -> bool,
    },
    /// Named check that may also normalise the value.
    Custom {
        /// Short name of the check, for diagnostics.
        name: &'static str,
        /// The check itself.
        check: CustomCheck,
    },
    /// `null`, or a value accepted by the inner validator.
    Nullable(Box<Validator>),
    /// A list whose every element is accepted by the inner validator.
    ListOf(Box<Validator>),
}

impl Validator {
    /// Shorthand for [`Validator::OneOf`] over string options.
    #[must_use]
    pub fn one_of(options: &[&str]) -> Self {
        Self::OneOf(options.iter().map(|option| Value::from(*option)).collect())
    }

    /// Wrap `self` so `null` is also accepted.
    #[must_use]
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    /// Wrap `self` so lists of accepted values are accepted.
    #[must_use]
    pub fn list(self) -> Self {
        Self::ListOf(Box::new(self))
    }

    /// Validate `raw`, returning the coerced value or a message explaining
    /// the requirement.
    ///
    /// # Errors
    ///
    /// Returns the human-readable requirement when `raw` is not acceptable.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::{Validator, ValueType};
    /// use serde_json::json;
    ///
    /// let flag = Validator::Type(ValueType::Boolean);
    /// assert_eq!(flag.validate(&json!("TRUE")), Ok(json!(true)));
    ///
    /// let access = Validator::one_of(&["restricted", "public"]);
    /// assert_eq!(
    ///     access.validate(&json!("yes please")),
    ///     Err(String::from(r#"Must be one of: "restricted", "public""#))
    /// );
    /// ```
    pub fn validate(&self, raw: &Value) -> Result<Value, String> {
        match self {
            Self::Type(kind) => kind
                .coerce(raw)
                .ok_or_else(|| kind.requirement().to_owned()),
            Self::OneOf(options) => match_option(options, raw).ok_or_else(|| {
                let rendered: Vec<String> = options.iter().map(Value::to_string).collect();
                format!("Must be one of: {}", rendered.join(", "))
            }),
            Self::Predicate { description, check } => {
                if check(raw) {
                    Ok(raw.clone())
                } else {
                    Err((*description).to_owned())
                }
            }
            Self::Custom { check, .. } => check(raw),
            Self::Nullable(inner) => {
                if raw.is_null() {
                    Ok(Value::Null)
                } else {
                    inner.validate(raw)
                }
            }
            Self::ListOf(inner) => split_list(raw)
                .iter()
                .map(|item| inner.validate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }
}

fn match_option(options: &[Value], raw: &Value) -> Option<Value> {
    options
        .iter()
        .find(|option| {
            *option == raw
                || match (option, raw) {
                    (Value::String(_), _) => false,
                    (_, Value::String(text)) => option.to_string() == *text,
                    _ => false,
                }
        })
        .cloned()
}

/// Expand a raw list value into its elements.
///
/// Strings are split on commas unless they look like structured data, the
/// same convention comma-separated environment lists follow elsewhere.
fn split_list(raw: &Value) -> Vec<Value> {
    match raw {
        Value::Array(items) => items.clone(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else if trimmed.starts_with(['[', '{', '"', '\'']) || !trimmed.contains(',') {
                vec![Value::String(trimmed.to_owned())]
            } else {
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(Value::from)
                    .collect()
            }
        }
        other => vec![other.clone()],
    }
}
