//! Reference machines.
//!
//! Each machine stresses a different corner of the equivalence law:
//! - `Adder`, `Counter`, `RunningAverage`: closed-form prefix computations
//! - `FifoBuffer`: overflow and eviction order
//! - `LinearDynamicsSystem`: a genuinely sequential recurrence
//! - `TemperatureController`: non-associative mode switching

mod adder;
mod counter;
mod fifo;
mod linear;
mod running_average;
mod temperature;

pub use adder::Adder;
pub use counter::Counter;
pub use fifo::{FifoBuffer, FifoState, EXAMPLE_CAPACITY};
pub use linear::{LinearDynamicsBuilder, LinearDynamicsSystem};
pub use running_average::{AverageState, RunningAverage};
pub use temperature::{
    Mode, TemperatureController, ThermostatInput, ThermostatState, DRIVE_RATE, HYSTERESIS_BAND,
};
