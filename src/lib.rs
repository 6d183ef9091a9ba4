//! # kaos-sequence
//!
//! The cursor primitive behind kaos ring buffers: a cache-line padded,
//! atomically updated 64-bit counter.
//!
//! ## Write modes
//!
//! - [`Sequence::set`] - release store. Publishes everything the writer did
//!   before it to whoever later reads the new value.
//! - [`Sequence::set_volatile`] - sequentially consistent store. Also takes
//!   part in the single total order, so store-buffering (Dekker) races
//!   cannot leave both sides reading stale values.
//!
//! Read-modify-write operations (`increment_and_get`, `add_and_get`,
//! `get_and_add`, `compare_and_set`) are always sequentially consistent.
//!
//! ```
//! use kaos_sequence::Sequence;
//!
//! let cursor = Sequence::new(-1);
//! assert_eq!(cursor.increment_and_get(), 0);
//! assert!(cursor.compare_and_set(0, 8));
//! cursor.set(16);
//! assert_eq!(cursor.get(), 16);
//! ```
//!
//! ## Model checking
//!
//! ```bash
//! RUSTFLAGS="--cfg loom" cargo test --release --test loom_sequence
//! ```

pub mod constants;
pub mod sequence;
pub mod util;

mod sync;

pub use sequence::Sequence;
pub use util::minimum_sequence;
