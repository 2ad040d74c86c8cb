//! Identifier allocation and path-parameter parsing.
//!
//! Ids are allocated from the historical maximum, not the collection
//! size, so ids freed by deletion are never handed out again while a
//! larger id remains. Allocation is not coordinated across requests:
//! two creates racing on the same snapshot can pick the same id.

use crate::message::Message;

/// Return `1 + max(existing ids)`, or `1` for an empty collection.
///
/// Returns `None` once the maximum id is `u64::MAX` and no larger id
/// exists to hand out.
pub fn next_id(messages: &[Message]) -> Option<u64> {
    messages.iter().map(|m| m.id).max().unwrap_or(0).checked_add(1)
}

/// Parse a raw path segment as a message id.
///
/// Accepts anything that reads as a finite number with no fractional
/// part and a value of at least 1 (`"7"`, `" 7 "`, `"7.0"`, `"7e0"`).
/// Rejects the empty string, `NaN`, `Infinity`, zero, negatives,
/// fractions and non-numeric text.
pub fn parse_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(n) = raw.parse::<u64>() {
        return (n > 0).then_some(n);
    }

    // Rust's float parser also understands "inf" and "nan" spellings;
    // both fail the finiteness check below. `u64::MAX as f64` rounds up
    // to 2^64, which is itself out of range.
    let n: f64 = raw.parse().ok()?;
    if !n.is_finite() || n.fract() != 0.0 || n < 1.0 || n >= u64::MAX as f64 {
        return None;
    }
    Some(n as u64)
}
