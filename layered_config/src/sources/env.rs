//! Environment variable collector.

use std::collections::BTreeMap;

use figment::providers::Env;
use serde_json::{Map, Value};

/// Prefix selecting configuration variables, e.g. `PM_CONFIG_LOGLEVEL`.
pub const DEFAULT_ENV_PREFIX: &str = "PM_CONFIG_";

/// Collect prefixed variables from the process environment.
///
/// Prefix matching ignores case. Keys are lowercased and underscores become
/// dashes, so `PM_CONFIG_FETCH_RETRIES=5` yields `fetch-retries = "5"`.
/// Values stay strings; validators coerce them on load.
#[must_use]
pub fn env_layer(prefix: &str) -> Map<String, Value> {
    collect(
        Env::prefixed(prefix)
            .iter()
            .map(|(key, value)| (key.as_str().to_owned(), value)),
    )
}

/// Collect prefixed variables from an explicit list of pairs.
///
/// # Examples
///
/// ```
/// use layered_config::sources::env_layer_from;
/// use serde_json::json;
///
/// let raw = env_layer_from(
///     "PM_CONFIG_",
///     [("PM_CONFIG_SAVE_EXACT", "true"), ("HOME", "/home/me")],
/// );
/// assert_eq!(raw.get("save-exact"), Some(&json!("true")));
/// assert_eq!(raw.len(), 1);
/// ```
#[must_use]
pub fn env_layer_from<I, K, V>(prefix: &str, vars: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let wanted = prefix.to_ascii_lowercase();
    collect(vars.into_iter().filter_map(|(key, value)| {
        key.as_ref()
            .to_ascii_lowercase()
            .strip_prefix(&wanted)
            .map(|name| (name.to_owned(), value.into()))
    }))
}

fn collect(vars: impl Iterator<Item = (String, String)>) -> Map<String, Value> {
    let sorted: BTreeMap<String, Value> = vars
        .filter_map(|(name, value)| {
            let key = name.trim().to_ascii_lowercase().replace('_', "-");
            (!key.is_empty()).then(|| (key, Value::String(value)))
        })
        .collect();
    sorted.into_iter().collect()
}
