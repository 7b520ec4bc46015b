//! Rendering effective configuration for the terminal.

use std::io::Write;

use layered_config::{EffectiveConfig, Origin, Warning};
use serde_json::{Map, Value};

use crate::cli::ListCommand;
use crate::error::Result;

/// Strings print bare; everything else prints as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Write the values of `keys`.
///
/// A single key prints its bare value; several keys print `key=value` lines.
///
/// # Errors
///
/// Returns an error for keys outside the registry or when writing fails.
pub fn write_get<W: Write>(out: &mut W, effective: &EffectiveConfig, keys: &[String]) -> Result<()> {
    if let [key] = keys {
        writeln!(out, "{}", display_value(effective.get(key)?))?;
        return Ok(());
    }
    for key in keys {
        writeln!(out, "{key}={}", display_value(effective.get(key)?))?;
    }
    Ok(())
}

/// Write the listing selected by `command`.
///
/// Text output holds one `key = value ; origin` line per entry, values
/// rendered as JSON. Only explicitly set keys are listed unless `long` is
/// set. JSON output is an object of effective values, or of
/// `{"value", "origin"}` records with `long`.
///
/// # Errors
///
/// Returns an error when writing or JSON rendering fails.
pub fn write_list<W: Write>(
    out: &mut W,
    effective: &EffectiveConfig,
    command: &ListCommand,
) -> Result<()> {
    if command.json {
        let rendered = if command.long {
            effective.to_annotated_value()
        } else {
            Value::Object(
                effective
                    .explicit()
                    .map(|(key, value, _)| (key.to_owned(), value.clone()))
                    .collect::<Map<_, _>>(),
            )
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&rendered)?)?;
        return Ok(());
    }

    let entries = effective
        .iter()
        .filter(|(_, _, origin)| command.long || *origin != Origin::Default);
    for (key, value, origin) in entries {
        writeln!(out, "{key} = {value} ; {origin}")?;
    }
    Ok(())
}

/// Write warnings as `<level> config <message>` lines.
///
/// # Errors
///
/// Returns an error when writing fails.
pub fn write_warnings<W: Write>(out: &mut W, warnings: &[Warning]) -> Result<()> {
    for warning in warnings {
        writeln!(
            out,
            "{} {} {}",
            warning.level(),
            Warning::SUBSYSTEM,
            warning.message()
        )?;
    }
    Ok(())
}

/// Write non-fatal source errors as `error config <error>` lines.
///
/// # Errors
///
/// Returns an error when writing fails.
pub fn write_source_errors<W: Write>(
    out: &mut W,
    errors: &[layered_config::ConfigError],
) -> Result<()> {
    for err in errors {
        writeln!(out, "error {} {err}", Warning::SUBSYSTEM)?;
    }
    Ok(())
}
