//! Spawn-time inheritance of the diagnostic context.
//!
//! A child execution context receives its parent's map *reference* at the
//! moment it is created. Nothing is copied here; the copy, if any, happens
//! on the first write on either side.

use super::current::{with_current, TASK_SLOT};
use crate::context::ContextSlot;
use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use tokio::task::futures::TaskLocalFuture;
use tokio::task::JoinHandle;
use tracing::debug;

/// A child slot captured from the current context, ready to be installed in
/// a new thread or task.
#[derive(Debug, Default)]
pub struct InheritedContext {
    slot: ContextSlot,
}

impl InheritedContext {
    /// Captures the current context for a child about to be spawned.
    #[must_use]
    pub fn capture() -> Self {
        let slot = with_current(ContextSlot::inherit);
        debug!(inherited = !slot.is_empty(), "Captured diagnostic context for child");
        Self { slot }
    }

    /// An empty context, for children that must not inherit anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an inherited context from an explicit parent slot.
    #[must_use]
    pub fn from_parent(parent: &mut ContextSlot) -> Self {
        Self {
            slot: parent.inherit(),
        }
    }

    /// Returns true if nothing was inherited.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// Consumes the handle, returning the child slot.
    #[must_use]
    pub fn into_slot(self) -> ContextSlot {
        self.slot
    }

    /// Installs the captured context as the current one.
    ///
    /// The previous context comes back when the guard is dropped. Guards
    /// nest: drop them in reverse order of creation (LIFO). Dropping an outer
    /// guard first restores its saved slot, and the inner guard then
    /// reinstalls a slot that is no longer the right one.
    #[must_use = "the previous context is restored as soon as the guard is dropped"]
    pub fn attach(self) -> ContextGuard {
        let previous = with_current(|slot| std::mem::replace(slot, self.slot));
        ContextGuard {
            previous: Some(previous),
            _not_send: PhantomData,
        }
    }

    /// Runs `future` with the captured context as its task-local context.
    pub fn scope<F: Future>(self, future: F) -> TaskLocalFuture<RefCell<ContextSlot>, F> {
        TASK_SLOT.scope(RefCell::new(self.slot), future)
    }

    /// Runs `f` with the captured context as its current context.
    pub fn sync_scope<F, R>(self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        TASK_SLOT.sync_scope(RefCell::new(self.slot), f)
    }
}

/// Restores the previously current context on drop.
#[derive(Debug)]
pub struct ContextGuard {
    previous: Option<ContextSlot>,
    // The guard must be dropped on the thread that created it.
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            with_current(|slot| *slot = previous);
        }
    }
}

/// Spawns a thread that inherits the current context.
pub fn spawn_thread<F, T>(f: F) -> std::thread::JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let inherited = InheritedContext::capture();
    std::thread::spawn(move || {
        let _guard = inherited.attach();
        f()
    })
}

/// Spawns a named thread that inherits the current context.
///
/// # Errors
///
/// Returns the OS error if the thread could not be created.
pub fn spawn_thread_named<F, T>(
    name: impl Into<String>,
    f: F,
) -> std::io::Result<std::thread::JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let inherited = InheritedContext::capture();
    std::thread::Builder::new().name(name.into()).spawn(move || {
        let _guard = inherited.attach();
        f()
    })
}

/// Spawns a tokio task that inherits the current context.
pub fn spawn_task<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(InheritedContext::capture().scope(future))
}

/// Runs blocking code on tokio's blocking pool with the current context.
pub fn spawn_blocking<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let inherited = InheritedContext::capture();
    tokio::task::spawn_blocking(move || inherited.sync_scope(f))
}
