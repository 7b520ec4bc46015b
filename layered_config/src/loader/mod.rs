//! Canonical load sequence assembling a [`ConfigStack`] from every source.
//!
//! Layers are loaded in a fixed order because later sources are located
//! through values resolved from earlier ones:
//!
//! 1. the command line mapping into `cli`;
//! 2. prefixed environment variables into `env`;
//! 3. the optional builtin file into `builtin`;
//! 4. `<project_dir>/<file_name>` into `project`, unless `global` resolves to
//!    `true` or the file is also the user file;
//! 5. the file named by `userconfig` into `user`;
//! 6. the file named by `globalconfig`, when set, into `global`.
//!
//! File failures do not stop the sequence; they are collected in the
//! returned [`LoadOutcome`].

mod options;

use camino::Utf8PathBuf;
use serde_json::{Map, Value};

use crate::sources::{env_layer, load_file_layer};
use crate::{
    ConfigData, ConfigError, ConfigStack, Location, Precedence, Registry, WarningSink,
};

pub use options::{DEFAULT_FILE_NAME, LoadOptions};

/// Result of a full load: the populated stack plus non-fatal source errors.
#[derive(Debug)]
pub struct LoadOutcome<'r> {
    stack: ConfigStack<'r>,
    errors: Vec<ConfigError>,
}

impl<'r> LoadOutcome<'r> {
    /// The populated stack.
    #[must_use]
    pub const fn stack(&self) -> &ConfigStack<'r> {
        &self.stack
    }

    /// Errors raised by sources that could not be read.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Indicates whether any source failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Decompose the outcome into the stack and the collected errors.
    #[must_use]
    pub fn into_parts(self) -> (ConfigStack<'r>, Vec<ConfigError>) {
        (self.stack, self.errors)
    }
}

/// Drives the load sequence against a registry and precedence table.
///
/// # Examples
///
/// ```no_run
/// use layered_config::{LoadOptions, Loader, TracingSink};
/// use serde_json::Map;
///
/// let outcome = Loader::new(LoadOptions::new()).load(Map::new(), &mut TracingSink);
/// for err in outcome.errors() {
///     eprintln!("{err}");
/// }
/// let effective = outcome.stack().resolve_all();
/// println!("{}", effective.to_value());
/// ```
#[derive(Clone, Debug)]
pub struct Loader<'r> {
    registry: &'r Registry,
    precedence: Precedence,
    options: LoadOptions,
}

impl Loader<'static> {
    /// Loader over the builtin registry and the standard precedence.
    #[must_use]
    pub fn new(options: LoadOptions) -> Self {
        Self::with_registry(Registry::builtin(), options)
    }
}

impl<'r> Loader<'r> {
    /// Loader validating against `registry`.
    #[must_use]
    pub fn with_registry(registry: &'r Registry, options: LoadOptions) -> Self {
        Self {
            registry,
            precedence: Precedence::standard(),
            options,
        }
    }

    /// Replace the precedence table. Locations it does not rank are skipped.
    #[must_use]
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Options in force.
    #[must_use]
    pub const fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Run the sequence, reading the process environment.
    pub fn load(&self, cli: Map<String, Value>, sink: &mut dyn WarningSink) -> LoadOutcome<'r> {
        self.load_with_env(cli, env_layer(self.options.env_prefix()), sink)
    }

    /// Run the sequence with an already collected environment mapping.
    ///
    /// `env` holds normalised keys as produced by
    /// [`crate::sources::env_layer_from`].
    pub fn load_with_env(
        &self,
        cli: Map<String, Value>,
        env: Map<String, Value>,
        sink: &mut dyn WarningSink,
    ) -> LoadOutcome<'r> {
        let mut outcome = LoadOutcome {
            stack: ConfigStack::new(self.registry, self.precedence.clone()),
            errors: Vec::new(),
        };

        self.load_mapping(&mut outcome, Location::Cli, "command line", cli, sink);
        self.load_mapping(&mut outcome, Location::Env, "environment", env, sink);

        if let Some(path) = self.options.builtin_file() {
            self.load_file(&mut outcome, Location::Builtin, path.to_owned(), sink);
        }

        let user_file = self.resolved_path(&outcome.stack, "userconfig");
        if let Some(project_file) = self.project_file(&outcome.stack, user_file.as_ref()) {
            self.load_file(&mut outcome, Location::Project, project_file, sink);
        }

        if let Some(path) = self.resolved_path(&outcome.stack, "userconfig") {
            self.load_file(&mut outcome, Location::User, path, sink);
        }
        if let Some(path) = self.resolved_path(&outcome.stack, "globalconfig") {
            self.load_file(&mut outcome, Location::Global, path, sink);
        }

        outcome
    }

    fn is_ranked(&self, location: Location) -> bool {
        let ranked = self.precedence.ranks(location);
        if !ranked {
            tracing::debug!(%location, "skipping configuration layer without a rank");
        }
        ranked
    }

    fn load_mapping(
        &self,
        outcome: &mut LoadOutcome<'r>,
        location: Location,
        source: &str,
        raw: Map<String, Value>,
        sink: &mut dyn WarningSink,
    ) {
        if !self.is_ranked(location) {
            return;
        }
        let mut layer = ConfigData::with_registry(location, self.registry);
        layer.set_source(source);
        layer.load(raw, sink);
        if let Err(err) = outcome.stack.insert_layer(layer) {
            outcome.errors.push(err);
        }
    }

    fn load_file(
        &self,
        outcome: &mut LoadOutcome<'r>,
        location: Location,
        path: Utf8PathBuf,
        sink: &mut dyn WarningSink,
    ) {
        if !self.is_ranked(location) {
            return;
        }
        let mut layer = ConfigData::with_registry(location, self.registry);
        match load_file_layer(&mut layer, &path, sink) {
            Ok(Some(_)) => {
                if let Err(err) = outcome.stack.insert_layer(layer) {
                    outcome.errors.push(err);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(%location, %path, error = %err, "configuration file failed to load");
                outcome.errors.push(err);
            }
        }
    }

    /// Project file path, unless project configuration is suppressed.
    fn project_file(
        &self,
        stack: &ConfigStack<'r>,
        user_file: Option<&Utf8PathBuf>,
    ) -> Option<Utf8PathBuf> {
        if matches!(stack.get("global"), Ok(Value::Bool(true))) {
            tracing::debug!("global mode; project configuration ignored");
            return None;
        }
        let path = self
            .options
            .resolved_project_dir()?
            .join(self.options.file_name());
        if user_file == Some(&path) {
            tracing::debug!(%path, "project file is the user file; loading it once");
            return None;
        }
        Some(path)
    }

    fn resolved_path(&self, stack: &ConfigStack<'r>, key: &str) -> Option<Utf8PathBuf> {
        match stack.get(key) {
            Ok(Value::String(raw)) if !raw.is_empty() => Some(self.options.expand_home(raw)),
            _ => None,
        }
    }
}
