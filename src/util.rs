//! Helpers for consumers gating on several cursors.

use std::sync::Arc;

use crate::Sequence;

/// Smallest value among `sequences`, capped at `minimum`.
///
/// Returns `minimum` for an empty slice. Each cursor is read once; the
/// result is a lower bound, other threads may have advanced since.
pub fn minimum_sequence(sequences: &[Arc<Sequence>], minimum: i64) -> i64 {
    sequences
        .iter()
        .map(|s| s.get())
        .fold(minimum, i64::min)
}
