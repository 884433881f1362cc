//! Stepwise: deterministic discrete-time state machines with a batch form
//!
//! Every machine is a pure transition `s_{i+1}, y_i = step(s_i, x_i)` plus a
//! `blockstep` that consumes a whole block of inputs at once. The batch form
//! exists only for speed: it must produce exactly the states and outputs that
//! folding `step` would.
//!
//! # Core Concepts
//!
//! - **StateMachine**: the four-operation contract and its equivalence law
//! - **Numeric**: a uniform container that typed values lower into
//! - **Machines**: six reference implementations covering prefix sums,
//!   overflow, linear recurrences and non-associative mode switching
//! - **Driver**: a thin shell that keeps the current state between calls
//! - **Verify**: a harness cross-checking `blockstep` against `step`
//!
//! # Example
//!
//! ```rust
//! use stepwise::core::StateMachine;
//! use stepwise::machines::{Mode, TemperatureController, ThermostatInput};
//!
//! let controller = TemperatureController;
//! let state = controller.create_initial_state();
//! let input = ThermostatInput { desired: 22.0, influence: 0.2 };
//!
//! let (state, mode) = controller.step(state, &input).unwrap();
//! assert_eq!(mode, Mode::Heating);
//! assert!((state.temperature - 20.2).abs() < 1e-12);
//! ```

pub mod container;
pub mod core;
pub mod driver;
pub mod machines;
pub mod verify;

// Re-export commonly used types
pub use container::{Numeric, Tolerance};
pub use self::core::{fold_steps, ConfigError, DynStateMachine, ShapeError, StateMachine};
pub use driver::Driver;
pub use verify::EquivalenceCheck;
