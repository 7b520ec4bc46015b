//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail isolates the working directory and environment variables, which
//! the loader reads. The helpers propagate the closure's return value as an
//! `anyhow::Result` so tests can use `?`.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// The jail is torn down once the closure completes, even when it fails.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure returns a
/// [`figment::error::Error`].
///
/// # Examples
///
/// ```
/// use test_helpers::with_jail;
///
/// let value = with_jail(|jail| {
///     jail.set_env("PM_CONFIG_TAG", "next");
///     Ok(std::env::var("PM_CONFIG_TAG").unwrap_or_default())
/// })?;
/// assert_eq!(value, "next");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`].
///
/// Bridges `anyhow` and engine errors into jail closures.
pub fn figment_error<E: ToString + ?Sized>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
