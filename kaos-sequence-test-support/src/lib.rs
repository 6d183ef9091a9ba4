//! # kaos-sequence-test-support
//!
//! Litmus-style stress testing for `kaos_sequence::Sequence`.
//!
//! ## Components
//!
//! - **Litmus** - A test state with two racing actors and an arbiter
//! - **OutcomeTable** - Which observed results are acceptable, interesting or forbidden
//! - **StressRunner** - Races actors over fresh states and tallies outcomes
//!
//! ## Inspired By
//!
//! OpenJDK jcstress: many fresh states per run, actors released together,
//! results grouped by outcome id.

pub mod error;
pub mod litmus;
pub mod outcome;
pub mod stress;

pub use error::{ Result, StressError };
pub use litmus::{ Litmus, LitmusResult };
pub use outcome::{ Expect, OutcomeTable };
pub use stress::{ print_summary, ObservedOutcome, StressConfig, StressReport, StressRunner };
