//! Destinations for warning records.

use super::{LogLevel, Warning};

/// Receiver of [`Warning`] records.
///
/// Emission is synchronous: `load` calls [`WarningSink::emit`] inline for
/// each record, in input order.
pub trait WarningSink {
    /// Accept one record.
    fn emit(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn emit(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl<S: WarningSink + ?Sized> WarningSink for &mut S {
    fn emit(&mut self, warning: Warning) {
        (**self).emit(warning);
    }
}

/// Sink forwarding records to `tracing` under the `config` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn emit(&mut self, warning: Warning) {
        let message = warning.message();
        match warning.level() {
            LogLevel::Error => {
                tracing::error!(target: "config", key = warning.key(), "{message}");
            }
            LogLevel::Warn => {
                tracing::warn!(target: "config", key = warning.key(), "{message}");
            }
            LogLevel::Info => {
                tracing::info!(target: "config", key = warning.key(), "{message}");
            }
        }
    }
}
