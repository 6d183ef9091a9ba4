//! Layout constants.

/// Padding granularity for a [`Sequence`](crate::Sequence).
///
/// 128 bytes covers Apple Silicon cache lines and the adjacent-line
/// prefetcher on x86 (64 bytes would be enough for the line alone).
pub const CACHE_LINE_SIZE: usize = 128;
