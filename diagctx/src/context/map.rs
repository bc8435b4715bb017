//! Shared diagnostic map instances.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A handle to one diagnostic map instance.
///
/// Cloning the handle shares the instance (this is how spawn-time
/// inheritance hands a parent's map to a child). [`DiagnosticMap::duplicate`]
/// creates a new, independent instance.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticMap {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl DiagnosticMap {
    /// Creates a new empty map instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map instance holding a copy of the given entries.
    #[must_use]
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(data)),
        }
    }

    /// Creates a new instance holding a copy of this one's entries.
    ///
    /// The read lock is held only while the entries are copied, so another
    /// context holding the same instance cannot observe a partial copy.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let data = self.entries.read().clone();
        Self {
            entries: Arc::new(RwLock::new(data)),
        }
    }

    /// Inserts or replaces an entry in this instance.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Removes an entry from this instance.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }

    /// Gets a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> HashSet<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Returns an independent copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.entries.read().clone()
    }

    /// Visits every entry under the read lock.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &str),
    {
        for (k, v) in self.entries.read().iter() {
            f(k, v);
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns true if both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}
