//! Litmus test definition.

use std::sync::atomic::{ AtomicI64, Ordering };

use crate::outcome::OutcomeTable;

/// Result slots filled by actors or the arbiter.
///
/// Slots are written with relaxed stores; the runner joins the actor
/// threads before reading them.
#[derive(Debug)]
pub struct LitmusResult {
    r1: AtomicI64,
    r2: AtomicI64,
    arity: usize,
}

impl LitmusResult {
    pub const MAX_ARITY: usize = 2;

    /// # Panics
    ///
    /// If `arity` is not 1 or 2.
    pub fn new(arity: usize) -> Self {
        assert!(
            (1..=Self::MAX_ARITY).contains(&arity),
            "litmus arity must be 1 or 2, got {}",
            arity
        );
        Self {
            r1: AtomicI64::new(0),
            r2: AtomicI64::new(0),
            arity,
        }
    }

    pub fn set_r1(&self, value: i64) {
        self.r1.store(value, Ordering::Relaxed);
    }

    pub fn set_r2(&self, value: i64) {
        self.r2.store(value, Ordering::Relaxed);
    }

    pub fn r1(&self) -> i64 {
        self.r1.load(Ordering::Relaxed)
    }

    pub fn r2(&self) -> i64 {
        self.r2.load(Ordering::Relaxed)
    }

    /// Outcome id: `"r1"` for one slot, `"r1, r2"` for two.
    pub fn id(&self) -> String {
        match self.arity {
            1 => format!("{}", self.r1()),
            _ => format!("{}, {}", self.r1(), self.r2()),
        }
    }
}

/// One litmus test. A fresh state is built per iteration, both actors run
/// once against it concurrently, then the arbiter runs alone.
pub trait Litmus: Sync + Sized {
    const NAME: &'static str;

    /// Number of result slots in the outcome id (1 or 2).
    const ARITY: usize;

    fn new() -> Self;

    fn outcomes() -> OutcomeTable;

    fn actor1(&self, r: &LitmusResult);

    fn actor2(&self, r: &LitmusResult);

    fn arbiter(&self, _r: &LitmusResult) {}
}
