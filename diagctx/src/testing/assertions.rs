//! Test assertions for the current diagnostic context.
//!
//! Each assertion reads the context, so a following write will copy.

use crate::scope::Mdc;
use std::collections::HashMap;

/// Asserts that `key` holds `expected` in the current context.
pub fn assert_context_value(key: &str, expected: &str) {
    let actual = Mdc::get(key);
    assert_eq!(
        actual.as_deref(),
        Some(expected),
        "Expected context value {:?} for key '{}', got {:?}",
        expected,
        key,
        actual
    );
}

/// Asserts that `key` is not set in the current context.
pub fn assert_context_missing(key: &str) {
    let actual = Mdc::get(key);
    assert!(
        actual.is_none(),
        "Expected key '{}' to be absent, found {:?}",
        key,
        actual
    );
}

/// Asserts that the current context is absent (never set, or cleared).
pub fn assert_context_absent() {
    let actual = Mdc::get_copy_of_context_map();
    assert!(
        actual.is_none(),
        "Expected no diagnostic context, found {:?}",
        actual
    );
}

/// Asserts that the current context holds exactly `expected`.
pub fn assert_context_eq(expected: &HashMap<String, String>) {
    let actual = Mdc::get_copy_of_context_map().unwrap_or_default();
    assert_eq!(&actual, expected, "Diagnostic context mismatch");
}
