//! Diagnostic context storage.
//!
//! This module provides:
//! - Shared map instances with a per-instance lock
//! - The per-context operation tracker
//! - The per-context slot implementing copy-on-write and snapshot access

mod map;
mod operation;
mod slot;

pub use map::DiagnosticMap;
pub use operation::{OperationTag, OperationTracker};
pub use slot::ContextSlot;
