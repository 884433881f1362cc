//! Object-safe view of a state machine over [`Numeric`] values.
//!
//! Typed machines have distinct state, input and output types, so they cannot
//! share a collection. `DynStateMachine` erases those types behind the numeric
//! container; shapes are checked on the way in.

use super::error::ShapeError;
use super::machine::StateMachine;
use crate::container::{FromNumeric, Numeric, ToNumeric};

/// Runtime-polymorphic state machine working on [`Numeric`] values.
///
/// Implemented for every [`StateMachine`] whose values have numeric codecs.
///
/// # Example
///
/// ```rust
/// use stepwise::container::Numeric;
/// use stepwise::core::DynStateMachine;
/// use stepwise::machines::{Adder, Counter, RunningAverage};
///
/// let machines: Vec<Box<dyn DynStateMachine>> =
///     vec![Box::new(Adder), Box::new(Counter), Box::new(RunningAverage)];
///
/// for machine in &machines {
///     let inputs = machine.example_inputs();
///     let (_, outputs) = machine.blockstep(&machine.initial_state(), &inputs).unwrap();
///     assert_eq!(outputs.len(), inputs.len());
/// }
/// ```
pub trait DynStateMachine: Send + Sync {
    fn initial_state(&self) -> Numeric;

    fn example_inputs(&self) -> Vec<Numeric>;

    fn step(&self, state: &Numeric, input: &Numeric) -> Result<(Numeric, Numeric), ShapeError>;

    fn blockstep(
        &self,
        state: &Numeric,
        inputs: &[Numeric],
    ) -> Result<(Numeric, Vec<Numeric>), ShapeError>;
}

impl<M> DynStateMachine for M
where
    M: StateMachine + Send + Sync,
    M::State: ToNumeric + FromNumeric,
    M::Input: ToNumeric + FromNumeric,
    M::Output: ToNumeric,
{
    fn initial_state(&self) -> Numeric {
        self.create_initial_state().to_numeric()
    }

    fn example_inputs(&self) -> Vec<Numeric> {
        self.create_example_inputs()
            .iter()
            .map(ToNumeric::to_numeric)
            .collect()
    }

    fn step(&self, state: &Numeric, input: &Numeric) -> Result<(Numeric, Numeric), ShapeError> {
        let state = M::State::from_numeric(state)?;
        let input = M::Input::from_numeric(input)?;
        let (next, output) = StateMachine::step(self, state, &input)?;
        Ok((next.to_numeric(), output.to_numeric()))
    }

    fn blockstep(
        &self,
        state: &Numeric,
        inputs: &[Numeric],
    ) -> Result<(Numeric, Vec<Numeric>), ShapeError> {
        let state = M::State::from_numeric(state)?;
        let inputs = inputs
            .iter()
            .map(M::Input::from_numeric)
            .collect::<Result<Vec<_>, _>>()?;
        let (next, outputs) = StateMachine::blockstep(self, state, &inputs)?;
        Ok((
            next.to_numeric(),
            outputs.iter().map(ToNumeric::to_numeric).collect(),
        ))
    }
}
