//! The implicit "current" diagnostic context and spawn-time inheritance.
//!
//! Every thread owns a slot. Tasks spawned through [`spawn_task`] (or any
//! future wrapped with [`InheritedContext::scope`]) carry their own slot in a
//! task-local, which takes precedence over the slot of whatever worker thread
//! happens to poll them.

mod current;
mod spawn;

pub use current::Mdc;
pub use spawn::{
    spawn_blocking, spawn_task, spawn_thread, spawn_thread_named, ContextGuard, InheritedContext,
};
