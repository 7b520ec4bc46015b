//! Command-line surface of `pm-config`.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use layered_config::{LoadOptions, Loader, LoadOutcome, WarningSink};
use serde_json::{Map, Value};

/// Inspect the layered configuration of the package manager.
#[derive(Debug, Parser)]
#[command(
    name = "pm-config",
    bin_name = "pm-config",
    about = "Show effective package manager configuration and where it comes from",
    version
)]
pub struct CommandLine {
    /// Switches shared by every command.
    #[command(flatten)]
    pub globals: GlobalArgs,
    /// Selected command.
    #[command(subcommand)]
    pub command: Commands,
}

/// Switches shared by every command.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Command-line settings; later occurrences of a key win.
    #[arg(
        long = "set",
        value_name = "KEY[=VALUE]",
        global = true,
        value_parser = parse_setting,
        help = "Set a configuration key for this invocation (a bare KEY means true)"
    )]
    pub settings: Vec<Setting>,
    /// Directory holding the project configuration file.
    #[arg(long, value_name = "DIR", global = true)]
    pub project_dir: Option<Utf8PathBuf>,
    /// Prefix selecting configuration environment variables.
    #[arg(long, value_name = "PREFIX", global = true)]
    pub env_prefix: Option<String>,
}

/// Commands exposed by the binary.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the effective value of one or more keys.
    Get(GetCommand),
    /// List configuration values.
    List(ListCommand),
}

/// Options for `get`.
#[derive(Debug, Args)]
pub struct GetCommand {
    /// Keys to print.
    #[arg(required = true, value_name = "KEY")]
    pub keys: Vec<String>,
}

/// Options for `list`.
#[derive(Debug, Default, Args)]
pub struct ListCommand {
    /// Include keys left at their defaults.
    #[arg(long, short = 'l')]
    pub long: bool,
    /// Print JSON instead of `key = value` lines.
    #[arg(long)]
    pub json: bool,
}

/// One `--set` occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setting {
    /// Configuration key.
    pub key: String,
    /// Raw value, validated when the command line layer loads.
    pub value: Value,
}

/// Parse `KEY=VALUE`, or a bare `KEY` meaning `true`.
///
/// # Errors
///
/// Returns a message when the key is empty.
///
/// # Examples
///
/// ```
/// use pm_config_cli::cli::parse_setting;
/// use serde_json::json;
///
/// let setting = parse_setting("tag=next")?;
/// assert_eq!((setting.key.as_str(), setting.value), ("tag", json!("next")));
/// assert_eq!(parse_setting("save-exact")?.value, json!(true));
/// # Ok::<_, String>(())
/// ```
pub fn parse_setting(raw: &str) -> Result<Setting, String> {
    let (key, value) = raw
        .split_once('=')
        .map_or((raw, Value::Bool(true)), |(key, value)| {
            (key, Value::String(value.to_owned()))
        });
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(format!("missing key in `{raw}`"));
    }
    Ok(Setting {
        key: trimmed.to_owned(),
        value,
    })
}

impl GlobalArgs {
    /// The raw command line layer, in first-seen key order.
    #[must_use]
    pub fn cli_mapping(&self) -> Map<String, Value> {
        let mut raw = Map::new();
        for setting in &self.settings {
            raw.insert(setting.key.clone(), setting.value.clone());
        }
        raw
    }

    /// Loader options reflecting the switches.
    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        let mut options = LoadOptions::new();
        if let Some(prefix) = &self.env_prefix {
            options = options.with_env_prefix(prefix);
        }
        if let Some(dir) = &self.project_dir {
            options = options.with_project_dir(dir);
        }
        options
    }

    /// Run the full load sequence for this invocation.
    pub fn load(&self, sink: &mut dyn WarningSink) -> LoadOutcome<'static> {
        tracing::debug!(settings = self.settings.len(), "loading configuration");
        Loader::new(self.load_options()).load(self.cli_mapping(), sink)
    }
}

#[cfg(test)]
mod tests;
