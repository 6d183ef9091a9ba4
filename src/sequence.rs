//! Padded 64-bit sequence counter.
//!
//! ## Memory Ordering
//!
//! | Operation            | Ordering                     |
//! |----------------------|------------------------------|
//! | `get`                | `SeqCst` load                |
//! | `set`                | `Release` store              |
//! | `set_volatile`       | `SeqCst` store               |
//! | `*_and_get`, `get_and_add` | `SeqCst` `fetch_add`   |
//! | `compare_and_set`    | `SeqCst` strong CAS          |
//!
//! `get` is `SeqCst` rather than `Acquire`: a `SeqCst` store paired with an
//! acquire load on another location still allows the store-buffering
//! outcome. On x86 and AArch64 both compile to the same load instruction.

use std::fmt;

use crate::sync::{ AtomicI64, Ordering };

/// A 64-bit cursor shared between producers and consumers.
///
/// The value sits alone on a 128-byte aligned block so independently
/// updated sequences never false-share. Shared by reference (`Arc` or
/// `&'static`), never owned by one thread.
#[repr(align(128))]
pub struct Sequence {
    value: AtomicI64,
}

#[cfg(not(loom))]
mod layout {
    use super::Sequence;
    use crate::constants::CACHE_LINE_SIZE;
    use static_assertions::{ assert_impl_all, const_assert, const_assert_eq };

    const_assert_eq!(std::mem::align_of::<Sequence>(), CACHE_LINE_SIZE);
    const_assert!(std::mem::size_of::<Sequence>() == CACHE_LINE_SIZE);
    assert_impl_all!(Sequence: Send, Sync);
}

impl Sequence {
    /// Create a sequence holding `initial`.
    pub fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Ordered store. Writes made before this call are visible to any thread
    /// that observes `value` through [`get`](Self::get), but there is no total
    /// order with ordered stores to other sequences.
    #[inline]
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Release);
    }

    /// Sequentially consistent store.
    #[inline]
    pub fn set_volatile(&self, value: i64) {
        self.value.store(value, Ordering::SeqCst);
    }

    /// Atomically add one and return the new value.
    #[inline]
    pub fn increment_and_get(&self) -> i64 {
        self.add_and_get(1)
    }

    /// Atomically add `delta` and return the new value. Wraps on overflow.
    #[inline]
    pub fn add_and_get(&self, delta: i64) -> i64 {
        self.get_and_add(delta).wrapping_add(delta)
    }

    /// Atomically add `delta` and return the previous value. Wraps on overflow.
    #[inline]
    pub fn get_and_add(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::SeqCst)
    }

    /// Store `new_value` if the current value is `expected`.
    ///
    /// Returns `false` without side effects on mismatch. Never fails
    /// spuriously, so callers may treat `false` as "someone else moved it".
    #[inline]
    pub fn compare_and_set(&self, expected: i64, new_value: i64) -> bool {
        self.value
            .compare_exchange(expected, new_value, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl From<i64> for Sequence {
    fn from(initial: i64) -> Self {
        Self::new(initial)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence").field("value", &self.get()).finish()
    }
}
