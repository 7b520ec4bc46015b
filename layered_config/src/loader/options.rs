//! Settings steering where the loader looks for configuration.

use camino::{Utf8Path, Utf8PathBuf};

use crate::sources::DEFAULT_ENV_PREFIX;

/// File name of the project configuration file.
pub const DEFAULT_FILE_NAME: &str = ".pmrc.toml";

/// Where [`super::Loader`] finds its sources.
///
/// # Examples
///
/// ```
/// use layered_config::LoadOptions;
///
/// let options = LoadOptions::new()
///     .with_env_prefix("ACME_")
///     .with_project_dir("/work/app")
///     .with_home_dir("/home/me");
/// assert_eq!(options.env_prefix(), "ACME_");
/// assert_eq!(options.expand_home("~/.cache").as_str(), "/home/me/.cache");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    env_prefix: String,
    file_name: String,
    project_dir: Option<Utf8PathBuf>,
    builtin_file: Option<Utf8PathBuf>,
    home_dir: Option<Utf8PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_owned(),
            file_name: DEFAULT_FILE_NAME.to_owned(),
            project_dir: None,
            builtin_file: None,
            home_dir: dirs::home_dir().and_then(|home| Utf8PathBuf::from_path_buf(home).ok()),
        }
    }
}

impl LoadOptions {
    /// Options with the default prefix, file name and home directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `prefix` to select environment variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Name of the configuration file looked up in the project directory.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Directory holding the project configuration file.
    ///
    /// Defaults to the working directory at load time.
    #[must_use]
    pub fn with_project_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// File loaded into the `builtin` layer.
    #[must_use]
    pub fn with_builtin_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.builtin_file = Some(path.into());
        self
    }

    /// Directory `~/` expands to.
    #[must_use]
    pub fn with_home_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Environment variable prefix.
    #[must_use]
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Project configuration file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Explicit project directory, if one was given.
    #[must_use]
    pub fn project_dir(&self) -> Option<&Utf8Path> {
        self.project_dir.as_deref()
    }

    /// Builtin configuration file, if one was given.
    #[must_use]
    pub fn builtin_file(&self) -> Option<&Utf8Path> {
        self.builtin_file.as_deref()
    }

    /// Home directory used for `~/` expansion.
    #[must_use]
    pub fn home_dir(&self) -> Option<&Utf8Path> {
        self.home_dir.as_deref()
    }

    /// Expand a leading `~` against the home directory.
    ///
    /// Paths are returned unchanged when no home directory is known or the
    /// path does not start with `~/`.
    #[must_use]
    pub fn expand_home(&self, raw: &str) -> Utf8PathBuf {
        match (&self.home_dir, raw) {
            (Some(home), "~") => home.clone(),
            (Some(home), _) => raw
                .strip_prefix("~/")
                .map_or_else(|| Utf8PathBuf::from(raw), |rest| home.join(rest)),
            (None, _) => Utf8PathBuf::from(raw),
        }
    }

    /// Project directory in force: the explicit one or the working directory.
    pub(super) fn resolved_project_dir(&self) -> Option<Utf8PathBuf> {
        self.project_dir.clone().or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        })
    }
}
