//! Leveled log sinks for the client
//!
//! The client reports what it does through an injected [`RequestLogger`]
//! rather than a global logger, so embedders can route or silence output per
//! client instance. Every method has a no-op default.

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

/// Sink for the client's diagnostic output.
///
/// Invoked around each request attempt and on validation failures. Logging
/// is a side channel only; failures are always propagated to the caller
/// regardless of what the sink does.
#[cfg_attr(test, automock)]
pub trait RequestLogger: Send + Sync {
    fn debug(&self, message: &str) {
        let _ = message;
    }

    fn info(&self, message: &str) {
        let _ = message;
    }

    fn warn(&self, message: &str) {
        let _ = message;
    }

    fn error(&self, message: &str) {
        let _ = message;
    }
}

/// Forwards each level to the `tracing` macros. This is the default sink;
/// output stays silent until the host installs a subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "jules_api", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "jules_api", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "jules_api", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "jules_api", "{message}");
    }
}

/// Discards all output.
#[derive(Debug, Clone, Default)]
pub struct NoopLogger;

impl RequestLogger for NoopLogger {}

pub(crate) fn default_logger() -> Arc<dyn RequestLogger> {
    Arc::new(TracingLogger)
}
