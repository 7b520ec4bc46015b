//! Constructors shared by modules that raise [`ConfigError`].

use std::error::Error;
use std::path::Path;

use super::ConfigError;

impl ConfigError {
    /// Construct an [`ConfigError::UnknownKey`] for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layered_config::ConfigError;
    /// let err = ConfigError::unknown_key("colour");
    /// assert_eq!(err.to_string(), "unknown configuration key `colour`");
    /// ```
    #[must_use]
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Construct a [`ConfigError::File`] for a configuration path.
    #[must_use]
    pub fn file(path: &Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Construct a [`ConfigError::File`] reporting malformed file contents.
    #[must_use]
    pub fn invalid_data(path: &Path, msg: impl Into<String>) -> Self {
        Self::file(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
        )
    }

    /// Returns `true` when the error reports a key missing from the registry.
    #[must_use]
    pub const fn is_unknown_key(&self) -> bool {
        matches!(self, Self::UnknownKey { .. })
    }
}
