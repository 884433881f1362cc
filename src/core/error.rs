//! Error types shared by every machine.
//!
//! Shape problems are detected at the boundary of `step`/`blockstep`, before a
//! new state is produced. Configuration problems are rejected at construction.

use thiserror::Error;

/// Input or state that does not match the shape fixed for a machine instance.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShapeError {
    #[error("{what}: expected length {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expected {expected} value, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected fields {expected:?}, found {found:?}")]
    FieldMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("buffer holds {found} items but capacity is {capacity}")]
    OverCapacity { capacity: usize, found: usize },

    #[error("{what}: invalid value {value}")]
    InvalidValue { what: &'static str, value: f64 },

    #[error("{what} overflowed")]
    Overflow { what: &'static str },
}

/// Invalid configuration passed to a machine constructor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("FIFO capacity must be positive")]
    ZeroCapacity,

    #[error("Transition matrix must not be empty")]
    EmptyMatrix,

    #[error("Matrix {matrix} is {found:?}, expected {expected:?} (rows, cols)")]
    NonConformable {
        matrix: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Matrix {0} not specified")]
    MissingMatrix(&'static str),

    #[error("Example inputs must not be empty")]
    NoExamples,
}
