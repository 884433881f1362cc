//! Count of input elements seen so far.

use crate::core::{ShapeError, StateMachine};

/// Adds the element count of every input to a running count.
///
/// Inputs of a fixed shape turn the block form into an arithmetic
/// progression; blocks with varying element counts fall back to a prefix sum.
/// A count that would pass `u64::MAX` is rejected with [`ShapeError::Overflow`]
/// by both forms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Counter;

impl StateMachine for Counter {
    type State = u64;
    type Input = Vec<i64>;
    type Output = u64;

    fn create_initial_state(&self) -> u64 {
        0
    }

    fn create_example_inputs(&self) -> Vec<Vec<i64>> {
        vec![vec![-1, 3], vec![1, 5], vec![5, 2]]
    }

    fn step(&self, state: u64, input: &Vec<i64>) -> Result<(u64, u64), ShapeError> {
        let next = add_count(state, input.len() as u64)?;
        Ok((next, next))
    }

    fn blockstep(&self, state: u64, inputs: &[Vec<i64>]) -> Result<(u64, Vec<u64>), ShapeError> {
        let Some(first) = inputs.first() else {
            return Ok((state, Vec::new()));
        };

        let per_input = first.len() as u64;
        let uniform = inputs.iter().all(|input| input.len() == first.len());

        let outputs: Vec<u64> = if uniform {
            (1..=inputs.len() as u64)
                .map(|position| {
                    position
                        .checked_mul(per_input)
                        .and_then(|added| state.checked_add(added))
                        .ok_or(ShapeError::Overflow { what: "count" })
                })
                .collect::<Result<_, ShapeError>>()?
        } else {
            let mut count = state;
            inputs
                .iter()
                .map(|input| {
                    add_count(count, input.len() as u64).map(|next| {
                        count = next;
                        next
                    })
                })
                .collect::<Result<_, ShapeError>>()?
        };

        let next = outputs.last().copied().unwrap_or(state);
        Ok((next, outputs))
    }
}

fn add_count(count: u64, elements: u64) -> Result<u64, ShapeError> {
    count
        .checked_add(elements)
        .ok_or(ShapeError::Overflow { what: "count" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fold_steps;

    #[test]
    fn step_adds_element_count() {
        let counter = Counter;
        let (state, output) = counter.step(3, &vec![7, 8, 9]).unwrap();

        assert_eq!(state, 6);
        assert_eq!(output, 6);
    }

    #[test]
    fn uniform_block_is_arithmetic_progression() {
        let counter = Counter;
        let (state, outputs) = counter
            .blockstep(1, &counter.create_example_inputs())
            .unwrap();

        assert_eq!(state, 7);
        assert_eq!(outputs, vec![3, 5, 7]);
    }

    #[test]
    fn ragged_block_matches_sequential_steps() {
        let counter = Counter;
        let inputs = vec![vec![1], vec![], vec![1, 2, 3], vec![4, 5]];

        let block = counter.blockstep(0, &inputs).unwrap();
        let folded = fold_steps(&counter, 0, &inputs).unwrap();

        assert_eq!(block, folded);
        assert_eq!(block.1, vec![1, 1, 4, 6]);
    }

    #[test]
    fn empty_block_keeps_state() {
        let counter = Counter;
        assert_eq!(counter.blockstep(9, &[]).unwrap(), (9, vec![]));
    }

    #[test]
    fn overflow_is_rejected_by_both_forms() {
        let counter = Counter;
        let overflow = ShapeError::Overflow { what: "count" };

        assert_eq!(counter.step(u64::MAX, &vec![1]).unwrap_err(), overflow);
        assert_eq!(counter.step(u64::MAX, &vec![]).unwrap(), (u64::MAX, u64::MAX));

        let uniform = vec![vec![1], vec![2]];
        assert_eq!(counter.blockstep(u64::MAX - 1, &uniform).unwrap_err(), overflow);
        assert_eq!(fold_steps(&counter, u64::MAX - 1, &uniform).unwrap_err(), overflow);

        let ragged = vec![vec![1], vec![], vec![1, 2]];
        assert_eq!(counter.blockstep(u64::MAX - 2, &ragged).unwrap_err(), overflow);
        assert_eq!(fold_steps(&counter, u64::MAX - 2, &ragged).unwrap_err(), overflow);
    }

    #[test]
    fn counts_up_to_the_limit_are_accepted() {
        let counter = Counter;
        let inputs = vec![vec![1, 2], vec![3, 4]];

        let (state, outputs) = counter.blockstep(u64::MAX - 4, &inputs).unwrap();
        assert_eq!(state, u64::MAX);
        assert_eq!(outputs, vec![u64::MAX - 2, u64::MAX]);
    }
}
