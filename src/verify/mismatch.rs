//! Findings reported by the equivalence harness.

use crate::container::Numeric;
use crate::core::ShapeError;
use thiserror::Error;

/// A way in which `blockstep` disagreed with folding `step`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Mismatch {
    #[error("blockstep failed where stepping succeeded: {0}")]
    BlockFailed(ShapeError),

    #[error("step {index} failed where blockstep succeeded: {error}")]
    StepFailed { index: usize, error: ShapeError },

    #[error("both paths rejected the inputs differently: step {index} gave {step}, blockstep gave {block}")]
    RejectionDiffers {
        index: usize,
        step: ShapeError,
        block: ShapeError,
    },

    #[error("blockstep produced {found} outputs for {expected} inputs")]
    OutputCount { expected: usize, found: usize },

    #[error("output {index} differs: stepping gave {expected:?}, blockstep gave {found:?}")]
    Output {
        index: usize,
        expected: Numeric,
        found: Numeric,
    },

    #[error("final state differs: stepping gave {expected:?}, blockstep gave {found:?}")]
    FinalState { expected: Numeric, found: Numeric },
}

/// Summary of a successful equivalence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquivalenceReport {
    /// Number of inputs in the longest block checked
    pub inputs: usize,
    /// Largest leaf-wise difference seen between the two paths
    pub max_deviation: f64,
}
