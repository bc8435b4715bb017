//! Emitting log events that carry the diagnostic context.

use super::attributes::ContextAttributes;
use tracing::Level;

/// Trait for log layers that attach the diagnostic context to their output.
///
/// Emitters only read the context.
pub trait DiagnosticEmitter: Send + Sync {
    /// Emits a message with the given context attributes.
    fn emit(&self, message: &str, attributes: &ContextAttributes);

    /// Emits a message with the current context.
    fn emit_current(&self, message: &str) {
        self.emit(message, &ContextAttributes::capture());
    }
}

/// No-op emitter.
#[derive(Debug, Clone, Default)]
pub struct NoOpDiagnosticEmitter;

impl DiagnosticEmitter for NoOpDiagnosticEmitter {
    fn emit(&self, _message: &str, _attributes: &ContextAttributes) {}

    fn emit_current(&self, _message: &str) {}
}

/// Emitter that writes `tracing` events with the context as a field.
#[derive(Debug, Clone)]
pub struct LoggingDiagnosticEmitter {
    level: Level,
}

impl Default for LoggingDiagnosticEmitter {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingDiagnosticEmitter {
    /// Creates an emitter logging at `level`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level emitter.
    #[must_use]
    pub const fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl DiagnosticEmitter for LoggingDiagnosticEmitter {
    fn emit(&self, message: &str, attributes: &ContextAttributes) {
        let mdc = &attributes.entries;
        match self.level {
            Level::ERROR => tracing::error!(?mdc, "{}", message),
            Level::WARN => tracing::warn!(?mdc, "{}", message),
            Level::DEBUG => tracing::debug!(?mdc, "{}", message),
            Level::TRACE => tracing::trace!(?mdc, "{}", message),
            _ => tracing::info!(?mdc, "{}", message),
        }
    }
}
