//! Mean of every input seen so far.

use crate::container::{FromNumeric, Numeric, ToNumeric};
use crate::core::{ShapeError, StateMachine};
use serde::{Deserialize, Serialize};

/// Sum and count of the inputs consumed so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageState {
    pub total_sum: f64,
    pub count: u64,
}

impl AverageState {
    /// Current mean, `None` before any input.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_sum / self.count as f64)
    }
}

/// Emits the running mean after every input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningAverage;

impl StateMachine for RunningAverage {
    type State = AverageState;
    type Input = f64;
    type Output = f64;

    fn create_initial_state(&self) -> AverageState {
        AverageState::default()
    }

    fn create_example_inputs(&self) -> Vec<f64> {
        vec![10.0, 20.0, 30.0, 40.0]
    }

    fn step(&self, state: AverageState, input: &f64) -> Result<(AverageState, f64), ShapeError> {
        let next = AverageState {
            total_sum: state.total_sum + input,
            count: state.count + 1,
        };
        Ok((next, next.total_sum / next.count as f64))
    }

    fn blockstep(
        &self,
        state: AverageState,
        inputs: &[f64],
    ) -> Result<(AverageState, Vec<f64>), ShapeError> {
        let block_sums: Vec<f64> = inputs
            .iter()
            .scan(0.0, |sum, input| {
                *sum += input;
                Some(*sum)
            })
            .collect();

        let outputs = block_sums
            .iter()
            .zip(1u64..)
            .map(|(sum, position)| (state.total_sum + sum) / (state.count + position) as f64)
            .collect();

        let next = AverageState {
            total_sum: state.total_sum + block_sums.last().copied().unwrap_or(0.0),
            count: state.count + inputs.len() as u64,
        };
        Ok((next, outputs))
    }
}

impl ToNumeric for AverageState {
    fn to_numeric(&self) -> Numeric {
        Numeric::record([
            ("total_sum", self.total_sum.to_numeric()),
            ("count", self.count.to_numeric()),
        ])
    }
}

impl FromNumeric for AverageState {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        let fields = value.fields(&["total_sum", "count"])?;
        Ok(Self {
            total_sum: f64::from_numeric(&fields["total_sum"])?,
            count: u64::from_numeric(&fields["count"])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Tolerance;
    use crate::core::fold_steps;

    #[test]
    fn blockstep_yields_running_means() {
        let average = RunningAverage;
        let (state, outputs) = average
            .blockstep(average.create_initial_state(), &average.create_example_inputs())
            .unwrap();

        assert_eq!(outputs, vec![10.0, 15.0, 20.0, 25.0]);
        assert_eq!(
            state,
            AverageState {
                total_sum: 100.0,
                count: 4,
            }
        );
        assert_eq!(state.mean(), Some(25.0));
    }

    #[test]
    fn blockstep_continues_from_existing_state() {
        let average = RunningAverage;
        let start = AverageState {
            total_sum: 30.0,
            count: 3,
        };
        let inputs = [0.1, 7.25, -3.5];

        let (block_state, block_outputs) = average.blockstep(start, &inputs).unwrap();
        let (step_state, step_outputs) = fold_steps(&average, start, &inputs).unwrap();

        let tolerance = Tolerance::default();
        assert!(block_state
            .to_numeric()
            .approx_eq(&step_state.to_numeric(), &tolerance));
        assert!(block_outputs
            .to_numeric()
            .approx_eq(&step_outputs.to_numeric(), &tolerance));
        assert_eq!(block_state.count, 6);
    }

    #[test]
    fn empty_state_has_no_mean() {
        assert_eq!(AverageState::default().mean(), None);
    }

    #[test]
    fn state_round_trips_through_numeric() {
        let state = AverageState {
            total_sum: 12.5,
            count: 2,
        };
        assert_eq!(AverageState::from_numeric(&state.to_numeric()), Ok(state));
        assert!(AverageState::from_numeric(&Numeric::Scalar(1.0)).is_err());
    }
}
