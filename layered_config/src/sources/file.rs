//! Configuration file reader.
//!
//! Files hold a flat table of `key = value` entries. The extension selects
//! the parser: `.json` files use JSON and everything else is read as TOML.

use camino::Utf8Path;
use serde_json::{Map, Value};

use crate::{ConfigData, ConfigError, ConfigResult, LoadReport, WarningSink};

/// Read the raw entries of a configuration file.
///
/// Returns `Ok(None)` when `path` does not name an existing file.
///
/// # Errors
///
/// Returns [`ConfigError::File`] when the file cannot be read, fails to
/// parse, or its top level is not a table.
pub fn read_layer_file(path: &Utf8Path) -> ConfigResult<Option<Map<String, Value>>> {
    if !path.is_file() {
        return Ok(None);
    }
    let data =
        std::fs::read_to_string(path).map_err(|err| ConfigError::file(path.as_std_path(), err))?;
    match parse_by_format(path, &data)? {
        Value::Object(map) => Ok(Some(map)),
        other => Err(ConfigError::invalid_data(
            path.as_std_path(),
            format!("expected a table of settings, found {}", kind_of(&other)),
        )),
    }
}

/// Read `path` and load its entries into `layer`.
///
/// The layer's source is set to `path` when the file exists. Returns
/// `Ok(None)` for missing files.
///
/// # Errors
///
/// Propagates [`read_layer_file`] failures; the layer is left untouched.
pub fn load_file_layer(
    layer: &mut ConfigData<'_>,
    path: &Utf8Path,
    sink: &mut dyn WarningSink,
) -> ConfigResult<Option<LoadReport>> {
    let Some(raw) = read_layer_file(path)? else {
        tracing::debug!(location = %layer.location(), %path, "configuration file not found");
        return Ok(None);
    };
    layer.set_source(path.as_str());
    let report = layer.load(raw, sink);
    tracing::debug!(location = %layer.location(), %path, "loaded configuration file");
    Ok(Some(report))
}

fn parse_by_format(path: &Utf8Path, data: &str) -> ConfigResult<Value> {
    let ext = path.extension().map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => {
            serde_json::from_str(data).map_err(|err| ConfigError::file(path.as_std_path(), err))
        }
        _ => parse_toml(path, data),
    }
}

#[cfg(feature = "toml")]
fn parse_toml(path: &Utf8Path, data: &str) -> ConfigResult<Value> {
    let table: toml::Table =
        toml::from_str(data).map_err(|err| ConfigError::file(path.as_std_path(), err))?;
    serde_json::to_value(table).map_err(|err| ConfigError::file(path.as_std_path(), err))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(path: &Utf8Path, _data: &str) -> ConfigResult<Value> {
    Err(ConfigError::file(
        path.as_std_path(),
        std::io::Error::other(
            "toml feature disabled: enable the 'toml' feature to support this file format",
        ),
    ))
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}
