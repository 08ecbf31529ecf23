//! Logger that forwards to `tracing`

use super::traits::Logger;

/// Routes messages into the `tracing` ecosystem under the `envcfg` target
///
/// Hosts that already install a `tracing` subscriber get container and
/// service messages alongside their own spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "envcfg", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "envcfg", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "envcfg", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "envcfg", "{}", message);
    }
}
