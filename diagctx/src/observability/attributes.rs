//! Diagnostic context rendered as span/log attributes.

use crate::scope::Mdc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default prefix applied to context keys when exported as attributes.
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "mdc.";

/// A detached snapshot of a diagnostic context, ready for a log record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextAttributes {
    /// The context entries, ordered by key.
    pub entries: BTreeMap<String, String>,
}

impl ContextAttributes {
    /// Creates empty attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current context.
    ///
    /// This is a read of the current context: the next write copies.
    #[must_use]
    pub fn capture() -> Self {
        Mdc::get_copy_of_context_map().map_or_else(Self::default, Self::from_map)
    }

    /// Creates attributes from a context copy.
    #[must_use]
    pub fn from_map(map: HashMap<String, String>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }

    /// Adds an entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts to OpenTelemetry-style attributes under the `mdc.` prefix.
    #[must_use]
    pub fn to_otel_attributes(&self) -> HashMap<String, String> {
        self.to_prefixed_attributes(DEFAULT_ATTRIBUTE_PREFIX)
    }

    /// Converts to attributes under an arbitrary prefix.
    #[must_use]
    pub fn to_prefixed_attributes(&self, prefix: &str) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (format!("{prefix}{k}"), v.clone()))
            .collect()
    }
}
