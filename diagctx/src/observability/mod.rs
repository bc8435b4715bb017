//! Observability utilities.
//!
//! Logging layers read the diagnostic context through these types; they
//! never write it.

mod attributes;
mod emitter;
mod logging;

pub use attributes::{ContextAttributes, DEFAULT_ATTRIBUTE_PREFIX};
pub use emitter::{DiagnosticEmitter, LoggingDiagnosticEmitter, NoOpDiagnosticEmitter};
pub use logging::{init_tracing, LoggingConfig};
