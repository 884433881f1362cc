//! The `StateMachine` contract.
//!
//! A machine is a pure transition `s_{i+1}, y_i = step(s_i, x_i)` together
//! with a batch form `blockstep` that must produce exactly what folding
//! `step` over the same inputs produces.

use super::error::ShapeError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Bound shared by every state, input and output type.
///
/// Values are plain data: cloneable, comparable, debuggable, serializable
/// and safe to move across threads.
pub trait Value:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

impl<T> Value for T where
    T: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

/// A deterministic, discrete-time state machine.
///
/// The machine itself only holds configuration. State is created by
/// [`create_initial_state`](StateMachine::create_initial_state) and threaded
/// by the caller through successive calls; every call takes the state by
/// value and hands back a new one.
///
/// # Equivalence law
///
/// For every state `s` and inputs `x_1..x_n`:
///
/// ```text
/// blockstep(s, [x_1..x_n]) == (s_n, [y_1..y_n])
///   where s_0 = s and (s_i, y_i) = step(s_{i-1}, x_i)
/// ```
///
/// With `n = 0`, `blockstep` returns `(s, [])`. Integer data must match
/// exactly, real-valued data within rounding.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{fold_steps, StateMachine};
/// use stepwise::machines::Adder;
///
/// let adder = Adder;
/// let inputs = adder.create_example_inputs();
///
/// let (state, outputs) = adder.blockstep(adder.create_initial_state(), &inputs).unwrap();
/// let (folded, expected) = fold_steps(&adder, adder.create_initial_state(), &inputs).unwrap();
///
/// assert_eq!(state, folded);
/// assert_eq!(outputs, expected);
/// assert_eq!(outputs, vec![2.0, 8.0, 15.0]);
/// ```
pub trait StateMachine {
    /// Internal memory at one moment.
    type State: Value;
    /// One observation fed to the machine.
    type Input: Value;
    /// One observation produced by the machine.
    type Output: Value;

    /// Deterministic starting state.
    fn create_initial_state(&self) -> Self::State;

    /// Non-empty list of sample inputs for demonstrations and tests.
    fn create_example_inputs(&self) -> Vec<Self::Input>;

    /// Advance by a single input.
    fn step(
        &self,
        state: Self::State,
        input: &Self::Input,
    ) -> Result<(Self::State, Self::Output), ShapeError>;

    /// Advance by a block of inputs at once.
    ///
    /// Must be observationally identical to [`fold_steps`]; it only changes how
    /// the results are computed.
    fn blockstep(
        &self,
        state: Self::State,
        inputs: &[Self::Input],
    ) -> Result<(Self::State, Vec<Self::Output>), ShapeError>;
}

/// Apply `step` once per input, collecting the outputs.
///
/// This is the reference semantics of `blockstep`. Machines whose transition
/// is not reducible to a closed form implement `blockstep` with it directly.
pub fn fold_steps<M>(
    machine: &M,
    state: M::State,
    inputs: &[M::Input],
) -> Result<(M::State, Vec<M::Output>), ShapeError>
where
    M: StateMachine + ?Sized,
{
    inputs
        .iter()
        .try_fold((state, Vec::with_capacity(inputs.len())), |(state, mut outputs), input| {
            let (next, output) = machine.step(state, input)?;
            outputs.push(output);
            Ok((next, outputs))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Toy machine counting inputs that exceed a threshold.
    struct Threshold {
        limit: i32,
    }

    impl StateMachine for Threshold {
        type State = u32;
        type Input = i32;
        type Output = bool;

        fn create_initial_state(&self) -> u32 {
            0
        }

        fn create_example_inputs(&self) -> Vec<i32> {
            vec![1, 5, 10]
        }

        fn step(&self, state: u32, input: &i32) -> Result<(u32, bool), ShapeError> {
            if *input < 0 {
                return Err(ShapeError::InvalidValue {
                    what: "input",
                    value: f64::from(*input),
                });
            }
            let above = *input > self.limit;
            Ok((state + u32::from(above), above))
        }

        fn blockstep(&self, state: u32, inputs: &[i32]) -> Result<(u32, Vec<bool>), ShapeError> {
            fold_steps(self, state, inputs)
        }
    }

    #[test]
    fn fold_steps_threads_state_through_every_input() {
        let machine = Threshold { limit: 4 };
        let (state, outputs) = fold_steps(&machine, 0, &[1, 5, 10, 2]).unwrap();

        assert_eq!(state, 2);
        assert_eq!(outputs, vec![false, true, true, false]);
    }

    #[test]
    fn fold_steps_on_empty_block_returns_state_unchanged() {
        let machine = Threshold { limit: 4 };
        let (state, outputs) = fold_steps(&machine, 7, &[]).unwrap();

        assert_eq!(state, 7);
        assert!(outputs.is_empty());
    }

    #[test]
    fn fold_steps_stops_at_first_error() {
        let machine = Threshold { limit: 4 };
        let result = fold_steps(&machine, 0, &[5, -1, 10]);

        assert!(matches!(result, Err(ShapeError::InvalidValue { .. })));
    }

    #[test]
    fn example_inputs_are_not_empty() {
        let machine = Threshold { limit: 4 };
        assert!(!machine.create_example_inputs().is_empty());
        assert_eq!(machine.create_initial_state(), 0);
    }
}
