//! Equivalence check between `blockstep` and sequential `step`.

use crate::container::{Numeric, ToNumeric, Tolerance};
use crate::core::{ShapeError, StateMachine};
use crate::verify::mismatch::{EquivalenceReport, Mismatch};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// Outcome of a check: a report, or every mismatch found.
pub type CheckResult = Validation<EquivalenceReport, NonEmptyVec<Mismatch>>;

/// Harness asserting that a machine's batch form agrees with its step form.
///
/// Both paths are run from the same state over the same inputs. Outputs and
/// final states are first compared as typed values; an exact check stops
/// there, so integers beyond `f64` precision are still told apart. Otherwise
/// values that differ are lowered to [`Numeric`] and compared under the
/// configured [`Tolerance`]. All disagreements are accumulated, not just the
/// first.
#[derive(Clone, Copy, Debug, Default)]
pub struct EquivalenceCheck {
    tolerance: Tolerance,
}

impl EquivalenceCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison tolerance for real values.
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Require bit-for-bit agreement.
    pub fn exact(self) -> Self {
        self.tolerance(Tolerance::exact())
    }

    /// Run both paths from `state` over `inputs` and compare them.
    ///
    /// If both paths reject the inputs with the same error the machine is
    /// consistent and the check succeeds. Rejection by only one path, or with
    /// different errors, is a mismatch.
    pub fn check<M>(&self, machine: &M, state: M::State, inputs: &[M::Input]) -> CheckResult
    where
        M: StateMachine + ?Sized,
        M::State: ToNumeric,
        M::Output: ToNumeric,
    {
        debug!(inputs = inputs.len(), "checking blockstep against sequential steps");

        let stepped = step_through(machine, state.clone(), inputs);
        let blocked = machine.blockstep(state, inputs);

        let ((expected_state, expected_outputs), (found_state, found_outputs)) =
            match (stepped, blocked) {
                (Ok(stepped), Ok(blocked)) => (stepped, blocked),
                (Err((_, step)), Err(block)) if step == block => {
                    return Validation::success(EquivalenceReport {
                        inputs: inputs.len(),
                        max_deviation: 0.0,
                    })
                }
                (Err((index, step)), Err(block)) => {
                    return Validation::fail(Mismatch::RejectionDiffers { index, step, block })
                }
                (Ok(_), Err(error)) => return Validation::fail(Mismatch::BlockFailed(error)),
                (Err((index, error)), Ok(_)) => {
                    return Validation::fail(Mismatch::StepFailed { index, error })
                }
            };

        let mut max_deviation = 0.0_f64;
        let mut checks: Vec<Validation<(), NonEmptyVec<Mismatch>>> = Vec::new();

        if expected_outputs.len() != found_outputs.len() {
            checks.push(Validation::fail(Mismatch::OutputCount {
                expected: expected_outputs.len(),
                found: found_outputs.len(),
            }));
        }

        for (index, (expected, found)) in expected_outputs.iter().zip(&found_outputs).enumerate() {
            checks.push(self.agree(
                expected,
                found,
                &mut max_deviation,
                |expected, found| Mismatch::Output {
                    index,
                    expected,
                    found,
                },
            ));
        }

        checks.push(self.agree(
            &expected_state,
            &found_state,
            &mut max_deviation,
            |expected, found| Mismatch::FinalState { expected, found },
        ));

        let outcome = Validation::all_vec(checks).map(|_| EquivalenceReport {
            inputs: inputs.len(),
            max_deviation,
        });

        if let Validation::Failure(errors) = &outcome {
            debug!(mismatches = errors.len(), "blockstep disagrees with step");
        }
        outcome
    }

    /// Check the machine's example inputs from its initial state, once for
    /// every prefix of the examples, the empty block included.
    pub fn check_examples<M>(&self, machine: &M) -> CheckResult
    where
        M: StateMachine + ?Sized,
        M::State: ToNumeric,
        M::Output: ToNumeric,
    {
        let inputs = machine.create_example_inputs();
        let checks: Vec<CheckResult> = (0..=inputs.len())
            .map(|end| self.check(machine, machine.create_initial_state(), &inputs[..end]))
            .collect();

        Validation::all_vec(checks).map(|reports| {
            reports.into_iter().fold(
                EquivalenceReport {
                    inputs: 0,
                    max_deviation: 0.0,
                },
                |acc, report| EquivalenceReport {
                    inputs: acc.inputs.max(report.inputs),
                    max_deviation: acc.max_deviation.max(report.max_deviation),
                },
            )
        })
    }

    fn agree<T>(
        &self,
        expected: &T,
        found: &T,
        max_deviation: &mut f64,
        mismatch: impl FnOnce(Numeric, Numeric) -> Mismatch,
    ) -> Validation<(), NonEmptyVec<Mismatch>>
    where
        T: PartialEq + ToNumeric,
    {
        if expected == found {
            return Validation::success(());
        }

        let (expected, found) = (expected.to_numeric(), found.to_numeric());
        if !self.tolerance.is_exact() && expected.approx_eq(&found, &self.tolerance) {
            if let Ok(deviation) = expected.deviation(&found) {
                if deviation.is_finite() {
                    *max_deviation = max_deviation.max(deviation);
                }
            }
            Validation::success(())
        } else {
            trace!(?expected, ?found, "values disagree");
            Validation::fail(mismatch(expected, found))
        }
    }
}

/// Fold `step` over the inputs, remembering which input failed.
fn step_through<M>(
    machine: &M,
    state: M::State,
    inputs: &[M::Input],
) -> Result<(M::State, Vec<M::Output>), (usize, ShapeError)>
where
    M: StateMachine + ?Sized,
{
    let mut state = state;
    let mut outputs = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        let (next, output) = machine.step(state, input).map_err(|error| (index, error))?;
        outputs.push(output);
        state = next;
    }
    Ok((state, outputs))
}
