//! Running total of everything seen so far.

use crate::core::{ShapeError, StateMachine};

/// Accumulates the sum of every input element.
///
/// Multi-element inputs are reduced by summation before accumulation; the
/// output of each step is the new total.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Adder;

impl StateMachine for Adder {
    type State = f64;
    type Input = Vec<f64>;
    type Output = f64;

    fn create_initial_state(&self) -> f64 {
        0.0
    }

    fn create_example_inputs(&self) -> Vec<Vec<f64>> {
        vec![vec![-1.0, 3.0], vec![1.0, 5.0], vec![5.0, 2.0]]
    }

    fn step(&self, state: f64, input: &Vec<f64>) -> Result<(f64, f64), ShapeError> {
        let next = state + input.iter().sum::<f64>();
        Ok((next, next))
    }

    fn blockstep(&self, state: f64, inputs: &[Vec<f64>]) -> Result<(f64, Vec<f64>), ShapeError> {
        // Prefix sums of the per-input sums, seeded with the incoming total.
        let outputs: Vec<f64> = inputs
            .iter()
            .map(|input| input.iter().sum::<f64>())
            .scan(state, |total, sum| {
                *total += sum;
                Some(*total)
            })
            .collect();

        let next = outputs.last().copied().unwrap_or(state);
        Ok((next, outputs))
    }
}
