//! Test fixtures.

use crate::scope::Mdc;
use std::collections::HashMap;

/// Builds an owned context map from string pairs.
#[must_use]
pub fn context_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Clears the current context on creation and again on drop.
#[derive(Debug)]
pub struct ContextFixture {
    _private: (),
}

impl ContextFixture {
    /// Starts from an empty context.
    #[must_use]
    pub fn new() -> Self {
        Mdc::clear();
        Self { _private: () }
    }

    /// Starts from a context holding `entries`.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let fixture = Self::new();
        Mdc::set_context_map(context_map(entries));
        fixture
    }
}

impl Default for ContextFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ContextFixture {
    fn drop(&mut self) {
        Mdc::clear();
    }
}
