//! Context readers.

use crate::scope::Mdc;
use std::collections::{HashMap, HashSet};

/// Read access to a diagnostic context.
///
/// This is all an RPC or logging layer needs: single lookups, a detached
/// copy, and key enumeration.
#[cfg_attr(test, mockall::automock)]
pub trait ContextReader: Send + Sync {
    /// Gets the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns an independent copy of the context.
    fn copy_of_context_map(&self) -> Option<HashMap<String, String>>;

    /// Returns the keys of the context.
    fn keys(&self) -> Option<HashSet<String>>;
}

/// Reads the context of whichever thread or task calls it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentContext;

impl ContextReader for CurrentContext {
    fn get(&self, key: &str) -> Option<String> {
        Mdc::get(key)
    }

    fn copy_of_context_map(&self) -> Option<HashMap<String, String>> {
        Mdc::get_copy_of_context_map()
    }

    fn keys(&self) -> Option<HashSet<String>> {
        Mdc::get_keys()
    }
}

impl ContextReader for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn copy_of_context_map(&self) -> Option<HashMap<String, String>> {
        Some(self.clone())
    }

    fn keys(&self) -> Option<HashSet<String>> {
        Some(HashMap::keys(self).cloned().collect())
    }
}
