//! Temporary directories holding configuration files.

use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory removed on drop, addressed by UTF-8 paths.
///
/// # Examples
///
/// ```
/// use test_helpers::ConfigDir;
///
/// let dir = ConfigDir::new()?;
/// let rc = dir.write(".pmrc.toml", "tag = \"next\"\n")?;
/// assert!(rc.starts_with(dir.path()));
/// assert!(rc.is_file());
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    root: Utf8PathBuf,
    _guard: TempDir,
}

impl ConfigDir {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let guard = TempDir::new().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path {} is not UTF-8", path.display()))?;
        Ok(Self {
            root,
            _guard: guard,
        })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `relative` inside the directory, without creating it.
    #[must_use]
    pub fn join(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Write `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}
