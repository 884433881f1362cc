//! Equivalence verification harness.
//!
//! Given any machine, a starting state and a block of inputs, the harness runs
//! `blockstep` and a fold of `step` side by side and compares the results.
//! It uses Stillwater's `Validation` to report ALL disagreements in one pass
//! rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use stepwise::machines::RunningAverage;
//! use stepwise::verify::EquivalenceCheck;
//! use stillwater::validation::Validation;
//!
//! let outcome = EquivalenceCheck::new().check_examples(&RunningAverage);
//!
//! match outcome {
//!     Validation::Success(report) => assert_eq!(report.inputs, 4),
//!     Validation::Failure(errors) => panic!("{} mismatches", errors.len()),
//! }
//! ```

mod check;
mod mismatch;

pub use crate::container::Tolerance;
pub use check::{CheckResult, EquivalenceCheck};
pub use mismatch::{EquivalenceReport, Mismatch};
