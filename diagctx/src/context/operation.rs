//! Per-context record of the last access made to a slot.

use std::fmt;

/// The kind of the most recent access to a context slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationTag {
    /// Nothing has been recorded yet (fresh or freshly inherited context).
    #[default]
    None,
    /// The last access read the slot.
    Read,
    /// The last access wrote the slot.
    Write,
}

impl OperationTag {
    /// Returns true if a write following this tag must copy the map first.
    #[must_use]
    pub const fn is_read_or_none(self) -> bool {
        matches!(self, Self::None | Self::Read)
    }
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Read => "read",
            Self::Write => "write",
        };
        write!(f, "{s}")
    }
}

/// Tracks the last operation performed by one execution context.
///
/// The tracker is owned by exactly one slot, so swapping the tag needs
/// no synchronization: exclusive access is guaranteed by `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct OperationTracker {
    last: OperationTag,
}

impl OperationTracker {
    /// Creates a tracker with nothing recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: OperationTag::None,
        }
    }

    /// Records `op` and returns the tag recorded immediately before it.
    pub fn record_and_swap(&mut self, op: OperationTag) -> OperationTag {
        std::mem::replace(&mut self.last, op)
    }

    /// Returns the last recorded tag.
    #[must_use]
    pub const fn last(&self) -> OperationTag {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_has_no_operation() {
        let tracker = OperationTracker::new();
        assert_eq!(tracker.last(), OperationTag::None);
    }

    #[test]
    fn test_record_and_swap_returns_previous() {
        let mut tracker = OperationTracker::new();

        assert_eq!(tracker.record_and_swap(OperationTag::Write), OperationTag::None);
        assert_eq!(tracker.record_and_swap(OperationTag::Write), OperationTag::Write);
        assert_eq!(tracker.record_and_swap(OperationTag::Read), OperationTag::Write);
        assert_eq!(tracker.last(), OperationTag::Read);
    }

    #[test]
    fn test_read_or_none() {
        assert!(OperationTag::None.is_read_or_none());
        assert!(OperationTag::Read.is_read_or_none());
        assert!(!OperationTag::Write.is_read_or_none());
    }
}
