//! Correlation id generation.

use uuid::Uuid;

/// Generates a new trace id (UUID v7, time-ordered, hyphenless).
#[must_use]
pub fn new_trace_id() -> String {
    Uuid::now_v7().simple().to_string()
}

/// Generates a new span id (the low 64 bits of a random UUID, as hex).
#[must_use]
pub fn new_span_id() -> String {
    let (_, low) = Uuid::new_v4().as_u64_pair();
    format!("{low:016x}")
}
