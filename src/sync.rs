//! Atomic primitives, swapped for loom's under `--cfg loom`.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{ AtomicI64, Ordering };

#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{ AtomicI64, Ordering };
