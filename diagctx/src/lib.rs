//! # diagctx
//!
//! A mapped diagnostic context (MDC) for Rust threads and tokio tasks.
//!
//! Each execution context owns a flat `String -> String` map of diagnostic
//! entries (trace ids, request ids, tenant names) that logging and RPC layers
//! read when they emit records or outgoing calls:
//!
//! - **Inheritance**: a child thread or task spawned through this crate sees
//!   the entries its parent had at spawn time
//! - **Isolation**: once either side writes, parent and child diverge; writes
//!   never leak backward into a parent or sideways into siblings
//! - **Cheap spawns**: inheritance shares the parent's map by reference and
//!   defers the copy to the first write
//! - **Snapshots**: bulk reads and bulk replaces never alias the live map
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use diagctx::prelude::*;
//!
//! Mdc::put("trace_id", new_trace_id())?;
//!
//! let handle = spawn_thread(|| {
//!     // Sees the parent's trace_id; writes here stay in this thread.
//!     Mdc::put("span_id", new_span_id())
//! });
//! handle.join().unwrap()?;
//!
//! assert!(Mdc::get("span_id").is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod errors;
pub mod observability;
pub mod propagation;
pub mod scope;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{ContextSlot, DiagnosticMap, OperationTag};
    pub use crate::errors::MdcError;
    pub use crate::observability::{
        init_tracing, ContextAttributes, DiagnosticEmitter, LoggingConfig,
        LoggingDiagnosticEmitter,
    };
    pub use crate::propagation::{ContextReader, CurrentContext, HeaderInjector, PropagationConfig};
    pub use crate::scope::{
        spawn_blocking, spawn_task, spawn_thread, spawn_thread_named, InheritedContext, Mdc,
    };
    pub use crate::utils::{new_span_id, new_trace_id};
}
