//! Error types for the `pm-config` binary.
//!
//! Engine failures and output failures are wrapped so `main` can hand a
//! single error type to `color-eyre`.

use std::io;

use thiserror::Error;

/// Errors raised while running a `pm-config` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration engine rejected a request.
    #[error("configuration error: {0}")]
    Config(#[from] layered_config::ConfigError),
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    /// The effective configuration could not be rendered as JSON.
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results in this crate.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
