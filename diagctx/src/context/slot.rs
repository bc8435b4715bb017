//! Per-execution-context slot and its copy-on-write protocol.
//!
//! A slot holds either nothing or a handle to a [`DiagnosticMap`]. Handles
//! are shared only through [`ContextSlot::inherit`]; every write decides
//! from the slot's [`OperationTracker`] whether the current instance is
//! still exclusively owned or must be copied first.

use super::map::DiagnosticMap;
use super::operation::{OperationTag, OperationTracker};
use crate::errors::MdcError;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// The diagnostic context storage of one execution context.
///
/// All accessors take `&mut self`: a slot belongs to exactly one thread or
/// task, and reads update the operation tracker too.
#[derive(Debug, Default)]
pub struct ContextSlot {
    map: Option<DiagnosticMap>,
    tracker: OperationTracker,
    allocations: u64,
}

impl ContextSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: None,
            tracker: OperationTracker::new(),
            allocations: 0,
        }
    }

    /// Puts a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MdcError::InvalidArgument` if `key` is `None`.
    pub fn put<'k>(
        &mut self,
        key: impl Into<Option<&'k str>>,
        value: impl Into<String>,
    ) -> Result<(), MdcError> {
        if let Some(copy) = self.put_tracked(key, value)? {
            copy.trace();
        }
        Ok(())
    }

    /// Removes `key`. Does nothing if the key is `None` or the slot is empty.
    pub fn remove<'k>(&mut self, key: impl Into<Option<&'k str>>) {
        if let Some(copy) = self.remove_tracked(key) {
            copy.trace();
        }
    }

    /// Like [`ContextSlot::put`], but reports a forced copy instead of logging it.
    pub(crate) fn put_tracked<'k>(
        &mut self,
        key: impl Into<Option<&'k str>>,
        value: impl Into<String>,
    ) -> Result<Option<CopyEvent>, MdcError> {
        let Some(key) = key.into() else {
            return Err(MdcError::invalid_argument("key cannot be null"));
        };

        let prev = self.tracker.record_and_swap(OperationTag::Write);
        let copy = self.prepare_write(prev);
        if let Some(map) = &self.map {
            map.insert(key, value);
        }
        Ok(copy)
    }

    /// Like [`ContextSlot::remove`], but reports a forced copy instead of logging it.
    pub(crate) fn remove_tracked<'k>(
        &mut self,
        key: impl Into<Option<&'k str>>,
    ) -> Option<CopyEvent> {
        let key = key.into()?;
        if self.map.is_none() {
            return None;
        }

        let prev = self.tracker.record_and_swap(OperationTag::Write);
        let copy = self.prepare_write(prev);
        if let Some(map) = &self.map {
            map.remove(key);
        }
        copy
    }

    /// Empties the slot.
    ///
    /// The previously referenced map is dropped, not cleared: a child that
    /// inherited it keeps its entries.
    pub fn clear(&mut self) {
        self.tracker.record_and_swap(OperationTag::Write);
        self.map = None;
    }

    /// Gets the value stored under `key`.
    pub fn get<'k>(&mut self, key: impl Into<Option<&'k str>>) -> Option<String> {
        let map = self.read()?;
        key.into().and_then(|key| map.get(key))
    }

    /// Returns the keys currently set, or `None` if the slot is empty.
    pub fn get_keys(&mut self) -> Option<HashSet<String>> {
        self.read().map(DiagnosticMap::keys)
    }

    /// Returns an independent copy of the context, or `None` if the slot is empty.
    pub fn get_copy_of_context_map(&mut self) -> Option<HashMap<String, String>> {
        self.read().map(DiagnosticMap::snapshot)
    }

    /// Replaces the context with a fresh copy of `entries`.
    ///
    /// An empty `entries` leaves an empty but present context, unlike
    /// [`ContextSlot::clear`].
    pub fn set_context_map<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tracker.record_and_swap(OperationTag::Write);
        self.map = Some(DiagnosticMap::from_entries(entries));
        self.allocations += 1;
    }

    /// Visits every entry without copying the map.
    pub fn for_each<F>(&mut self, f: F)
    where
        F: FnMut(&str, &str),
    {
        if let Some(map) = self.read() {
            map.for_each(f);
        }
    }

    /// Creates the slot of a child execution context.
    ///
    /// The child shares this slot's map instance, not a copy, and starts with
    /// nothing recorded, so its first write copies. The share counts as a read
    /// here, so this slot's next write copies as well.
    #[must_use]
    pub fn inherit(&mut self) -> Self {
        self.tracker.record_and_swap(OperationTag::Read);
        Self {
            map: self.map.clone(),
            tracker: OperationTracker::new(),
            allocations: 0,
        }
    }

    /// Returns true if the slot holds no map at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_none()
    }

    /// Returns the last operation recorded for this slot.
    #[must_use]
    pub const fn last_operation(&self) -> OperationTag {
        self.tracker.last()
    }

    /// Returns how many map instances this slot has created.
    #[must_use]
    pub const fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Returns true if both slots currently reference the same map instance.
    #[must_use]
    pub fn shares_map_with(&self, other: &Self) -> bool {
        match (&self.map, &other.map) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    fn read(&mut self) -> Option<&DiagnosticMap> {
        self.tracker.record_and_swap(OperationTag::Read);
        self.map.as_ref()
    }

    /// Makes the slot's map exclusively owned before a write.
    ///
    /// Returns the copy that was made, if any. Nothing is logged here: the
    /// caller may be holding the current-context borrow.
    fn prepare_write(&mut self, prev: OperationTag) -> Option<CopyEvent> {
        if !prev.is_read_or_none() && self.map.is_some() {
            return None;
        }

        let fresh = self
            .map
            .as_ref()
            .map_or_else(DiagnosticMap::new, DiagnosticMap::duplicate);
        self.allocations += 1;
        let event = CopyEvent {
            previous: prev,
            entries: fresh.len(),
            allocations: self.allocations,
        };
        self.map = Some(fresh);
        Some(event)
    }
}

/// A copy forced by the copy-on-write protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CopyEvent {
    previous: OperationTag,
    entries: usize,
    allocations: u64,
}

impl CopyEvent {
    /// Emits the trace event for this copy.
    pub(crate) fn trace(&self) {
        trace!(
            previous_operation = %self.previous,
            entries = self.entries,
            allocations = self.allocations,
            "Copied diagnostic context before write"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_put_on_empty_slot_allocates() {
        let mut slot = ContextSlot::new();
        slot.put("k", "v").unwrap();

        assert_eq!(slot.allocations(), 1);
        assert_eq!(slot.last_operation(), OperationTag::Write);
    }

    #[test]
    fn test_put_none_key_leaves_tracker_untouched() {
        let mut slot = ContextSlot::new();
        let err = slot.put(None::<&str>, "v").unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(slot.last_operation(), OperationTag::None);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_write_after_read_copies() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        let _ = slot.get("a");
        slot.put("b", "2").unwrap();

        assert_eq!(slot.allocations(), 2);
    }

    #[test]
    fn test_remove_on_empty_slot_is_noop() {
        let mut slot = ContextSlot::new();
        slot.remove("missing");
        slot.remove(None::<&str>);

        assert_eq!(slot.last_operation(), OperationTag::None);
        assert_eq!(slot.allocations(), 0);
    }

    #[test]
    fn test_remove_in_place_after_write() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        slot.put("b", "2").unwrap();
        slot.remove("a");

        assert_eq!(slot.allocations(), 1);
        assert_eq!(slot.get("a"), None);
        assert_eq!(slot.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_remove_after_read_copies() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        let _ = slot.get_keys();
        slot.remove("a");

        assert_eq!(slot.allocations(), 2);
        assert_eq!(slot.get_keys(), Some(HashSet::new()));
    }

    #[test]
    fn test_set_context_map_empty_is_present() {
        let mut slot = ContextSlot::new();
        slot.set_context_map(HashMap::<String, String>::new());

        assert!(!slot.is_empty());
        assert_eq!(slot.get_copy_of_context_map(), Some(HashMap::new()));
        assert_eq!(slot.get_keys(), Some(HashSet::new()));
    }

    #[test]
    fn test_set_context_map_then_put_mutates_in_place() {
        let mut slot = ContextSlot::new();
        slot.set_context_map([("a", "1")]);
        slot.put("b", "2").unwrap();

        assert_eq!(slot.allocations(), 1);
    }

    #[test]
    fn test_clear_empties_slot() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        slot.clear();

        assert!(slot.is_empty());
        assert_eq!(slot.last_operation(), OperationTag::Write);
        assert_eq!(slot.get_copy_of_context_map(), None);
    }

    #[test]
    fn test_inherit_shares_reference() {
        let mut parent = ContextSlot::new();
        parent.put("a", "1").unwrap();
        let child = parent.inherit();

        assert!(parent.shares_map_with(&child));
        assert_eq!(parent.last_operation(), OperationTag::Read);
        assert_eq!(child.last_operation(), OperationTag::None);
        assert_eq!(child.allocations(), 0);
    }

    #[test]
    fn test_inherit_from_empty_is_empty() {
        let mut parent = ContextSlot::new();
        let child = parent.inherit();

        assert!(child.is_empty());
        assert!(!parent.shares_map_with(&child));
    }

    #[test]
    fn test_put_tracked_reports_copy_only_when_copying() {
        let mut slot = ContextSlot::new();

        let first = slot.put_tracked("a", "1").unwrap();
        let second = slot.put_tracked("b", "2").unwrap();

        assert_eq!(
            first,
            Some(CopyEvent {
                previous: OperationTag::None,
                entries: 0,
                allocations: 1,
            })
        );
        assert_eq!(second, None);
    }

    #[test]
    fn test_remove_tracked_after_read_reports_copy() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        let _ = slot.get("a");

        let copy = slot.remove_tracked("a");
        assert_eq!(copy.map(|c| c.previous), Some(OperationTag::Read));
        assert_eq!(slot.remove_tracked("missing"), None);
    }

    #[test]
    fn test_for_each_records_read() {
        let mut slot = ContextSlot::new();
        slot.put("a", "1").unwrap();
        let mut count = 0;
        slot.for_each(|_, _| count += 1);

        assert_eq!(count, 1);
        assert_eq!(slot.last_operation(), OperationTag::Read);
    }
}
