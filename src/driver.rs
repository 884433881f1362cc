//! Driver that owns a machine and its current state.
//!
//! Machines themselves are stateless; the driver is the thin shell that keeps
//! the latest state between calls. A failed advance leaves the driver exactly
//! as it was.

use crate::core::{ShapeError, StateMachine, Trajectory};
use tracing::{debug, trace};

/// Holds a machine, its current state and, optionally, the trajectory so far.
///
/// # Example
///
/// ```rust
/// use stepwise::driver::Driver;
/// use stepwise::machines::RunningAverage;
///
/// let mut driver = Driver::new(RunningAverage).recording();
/// driver.advance(&10.0).unwrap();
/// let outputs = driver.advance_block(&[20.0, 30.0]).unwrap();
///
/// assert_eq!(outputs, vec![15.0, 20.0]);
/// assert_eq!(driver.state().count, 3);
/// assert_eq!(driver.trajectory().map(|t| t.len()), Some(3));
/// ```
pub struct Driver<M: StateMachine> {
    machine: M,
    current: M::State,
    trajectory: Option<Trajectory<M::State, M::Output>>,
}

impl<M: StateMachine> Driver<M> {
    /// Create a driver in the machine's initial state.
    pub fn new(machine: M) -> Self {
        let current = machine.create_initial_state();
        Self::with_state(machine, current)
    }

    /// Create a driver starting from an explicit state.
    pub fn with_state(machine: M, state: M::State) -> Self {
        Self {
            machine,
            current: state,
            trajectory: None,
        }
    }

    /// Record every step taken from now on.
    pub fn recording(mut self) -> Self {
        self.trajectory = Some(Trajectory::new());
        self
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Current state (pure)
    pub fn state(&self) -> &M::State {
        &self.current
    }

    /// Recorded trajectory, if recording is enabled (pure)
    pub fn trajectory(&self) -> Option<&Trajectory<M::State, M::Output>> {
        self.trajectory.as_ref()
    }

    /// Advance by one input.
    pub fn advance(&mut self, input: &M::Input) -> Result<M::Output, ShapeError> {
        let (next, output) = self.machine.step(self.current.clone(), input)?;
        trace!(recording = self.trajectory.is_some(), "advanced one step");

        if let Some(trajectory) = &self.trajectory {
            self.trajectory = Some(trajectory.record(next.clone(), output.clone()));
        }
        self.current = next;
        Ok(output)
    }

    /// Advance by a block of inputs using the machine's batch form.
    ///
    /// When recording, intermediate states are not produced by `blockstep`, so
    /// they are reconstructed by running `step` over the whole block again.
    /// A recording block advance therefore costs one `blockstep` plus one
    /// `step` per input; without recording only `blockstep` runs. The
    /// recorded outputs are the ones `blockstep` returned.
    pub fn advance_block(&mut self, inputs: &[M::Input]) -> Result<Vec<M::Output>, ShapeError> {
        let (next, outputs) = self.machine.blockstep(self.current.clone(), inputs)?;
        debug!(
            block_len = inputs.len(),
            recording = self.trajectory.is_some(),
            "advanced block"
        );

        if let Some(trajectory) = &self.trajectory {
            let states = self.intermediate_states(inputs)?;
            self.trajectory = Some(trajectory.record_block(states, outputs.clone()));
        }
        self.current = next;
        Ok(outputs)
    }

    /// Return to the machine's initial state, clearing any recording.
    pub fn reset(&mut self) {
        self.current = self.machine.create_initial_state();
        if self.trajectory.is_some() {
            self.trajectory = Some(Trajectory::new());
        }
    }

    /// Give up the driver, returning the machine and its final state.
    pub fn into_parts(self) -> (M, M::State) {
        (self.machine, self.current)
    }

    fn intermediate_states(&self, inputs: &[M::Input]) -> Result<Vec<M::State>, ShapeError> {
        let mut state = self.current.clone();
        let mut states = Vec::with_capacity(inputs.len());
        for input in inputs {
            let (next, _) = self.machine.step(state, input)?;
            states.push(next.clone());
            state = next;
        }
        Ok(states)
    }
}
