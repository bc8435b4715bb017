//! Read-side interface used by RPC clients to forward the diagnostic context.
//!
//! Outgoing calls attach the caller's context entries as request metadata.
//! Nothing here writes the context, and nothing here extracts it on the
//! receiving side.

mod config;
mod injector;
mod reader;

pub use config::PropagationConfig;
pub use injector::HeaderInjector;
pub use reader::{ContextReader, CurrentContext};

#[cfg(test)]
pub use reader::MockContextReader;
