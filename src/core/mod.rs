//! Core state machine contract.
//!
//! This module contains the pure functional core:
//! - The `StateMachine` trait and its reference fold
//! - Shape and configuration errors
//! - Immutable trajectory records
//! - An object-safe, numerically typed view for heterogeneous collections
//!
//! Nothing in this module holds mutable state; machines are configuration and
//! state is threaded by the caller.

mod erased;
mod error;
mod machine;
mod trajectory;

pub use erased::DynStateMachine;
pub use error::{ConfigError, ShapeError};
pub use machine::{fold_steps, StateMachine, Value};
pub use trajectory::{Trajectory, TrajectoryEntry};
