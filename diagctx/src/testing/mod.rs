//! Testing utilities for code that uses the diagnostic context.
//!
//! This module provides:
//! - Assertions against the current context
//! - Fixtures that start each test from a clean context

mod assertions;
mod fixtures;

pub use assertions::{
    assert_context_absent, assert_context_eq, assert_context_missing, assert_context_value,
};
pub use fixtures::{context_map, ContextFixture};
