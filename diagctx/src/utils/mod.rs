//! Utility functions for correlation ids.

mod ids;

pub use ids::{new_span_id, new_trace_id};
