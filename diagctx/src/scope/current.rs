//! Static access to the current execution context's slot.

use crate::context::{ContextSlot, OperationTag};
use crate::errors::MdcError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

thread_local! {
    static THREAD_SLOT: RefCell<ContextSlot> = const { RefCell::new(ContextSlot::new()) };
}

tokio::task_local! {
    pub(super) static TASK_SLOT: RefCell<ContextSlot>;
}

/// Runs `f` against the slot of the current execution context.
///
/// The slot is mutably borrowed for the duration of the call. A nested call
/// made while it is borrowed (from a `for_each` callback, say) runs against a
/// detached empty slot: reads see no context and writes are discarded.
pub(super) fn with_current<R>(f: impl FnOnce(&mut ContextSlot) -> R) -> R {
    if TASK_SLOT.try_with(|_| ()).is_ok() {
        TASK_SLOT.with(|cell| run_borrowed(cell, f))
    } else {
        THREAD_SLOT.with(|cell| run_borrowed(cell, f))
    }
}

fn run_borrowed<R>(cell: &RefCell<ContextSlot>, f: impl FnOnce(&mut ContextSlot) -> R) -> R {
    match cell.try_borrow_mut() {
        Ok(mut slot) => f(&mut slot),
        Err(_) => f(&mut ContextSlot::new()),
    }
}

/// Mapped diagnostic context of the current thread or task.
///
/// Entries are visible to the context that set them and to contexts spawned
/// from it afterwards through [`crate::scope::spawn_thread`],
/// [`crate::scope::spawn_task`] or [`crate::scope::InheritedContext`].
///
/// A future started with plain `tokio::spawn` has no context of its own: it
/// uses the slot of whichever worker thread polls it, which unrelated tasks
/// on that worker share. Spawn with [`crate::scope::spawn_task`], or wrap the
/// future with [`crate::scope::InheritedContext::scope`], to give each task
/// its own context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mdc;

impl Mdc {
    /// Puts a value under `key` in the current context.
    ///
    /// # Errors
    ///
    /// Returns `MdcError::InvalidArgument` if `key` is `None`.
    pub fn put<'k>(
        key: impl Into<Option<&'k str>>,
        value: impl Into<String>,
    ) -> Result<(), MdcError> {
        let key = key.into();
        let value = value.into();
        if let Some(copy) = with_current(|slot| slot.put_tracked(key, value))? {
            copy.trace();
        }
        Ok(())
    }

    /// Removes `key` from the current context.
    pub fn remove<'k>(key: impl Into<Option<&'k str>>) {
        let key = key.into();
        if let Some(copy) = with_current(|slot| slot.remove_tracked(key)) {
            copy.trace();
        }
    }

    /// Clears the current context.
    pub fn clear() {
        with_current(ContextSlot::clear);
    }

    /// Gets the value stored under `key` in the current context.
    #[must_use]
    pub fn get<'k>(key: impl Into<Option<&'k str>>) -> Option<String> {
        let key = key.into();
        with_current(|slot| slot.get(key))
    }

    /// Returns the keys of the current context.
    #[must_use]
    pub fn get_keys() -> Option<HashSet<String>> {
        with_current(ContextSlot::get_keys)
    }

    /// Returns an independent copy of the current context.
    #[must_use]
    pub fn get_copy_of_context_map() -> Option<HashMap<String, String>> {
        with_current(ContextSlot::get_copy_of_context_map)
    }

    /// Replaces the current context with a copy of `entries`.
    pub fn set_context_map<I, K, V>(entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        with_current(|slot| slot.set_context_map(entries));
    }

    /// Visits every entry of the current context without copying it.
    ///
    /// `f` must not call back into [`Mdc`].
    pub fn for_each<F>(f: F)
    where
        F: FnMut(&str, &str),
    {
        with_current(|slot| slot.for_each(f));
    }

    /// Returns the last operation recorded for the current context.
    #[must_use]
    pub fn last_operation() -> OperationTag {
        with_current(|slot| slot.last_operation())
    }

    /// Returns how many map instances the current context has created.
    #[must_use]
    pub fn allocations() -> u64 {
        with_current(|slot| slot.allocations())
    }
}
