//! Discrete-time linear dynamics `x' = A·x + B·u`, observed through `y = C·x'`.
//!
//! Each state depends on the previous one through a matrix product, so the
//! state recurrence stays sequential in the block form. Only the output
//! projection is batched: one `C · [x_1 … x_n]` product for the whole block.

mod builder;

pub use builder::LinearDynamicsBuilder;

use crate::core::{ConfigError, ShapeError, StateMachine};
use nalgebra::{DMatrix, DVector};

/// Linear time-invariant system with fixed transition, control and output matrices.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearDynamicsSystem {
    a: DMatrix<f64>,
    b: DMatrix<f64>,
    c: DMatrix<f64>,
}

impl LinearDynamicsSystem {
    /// Validate conformability and build the system.
    ///
    /// `a` must be square and non-empty, `b` must have as many rows as `a`,
    /// and `c` as many columns as `a`.
    pub fn new(a: DMatrix<f64>, b: DMatrix<f64>, c: DMatrix<f64>) -> Result<Self, ConfigError> {
        let n = a.nrows();
        if n == 0 {
            return Err(ConfigError::EmptyMatrix);
        }
        if a.ncols() != n {
            return Err(ConfigError::NonConformable {
                matrix: "A",
                expected: (n, n),
                found: a.shape(),
            });
        }
        if b.nrows() != n {
            return Err(ConfigError::NonConformable {
                matrix: "B",
                expected: (n, b.ncols()),
                found: b.shape(),
            });
        }
        if c.ncols() != n {
            return Err(ConfigError::NonConformable {
                matrix: "C",
                expected: (c.nrows(), n),
                found: c.shape(),
            });
        }
        Ok(Self { a, b, c })
    }

    pub fn builder() -> LinearDynamicsBuilder {
        LinearDynamicsBuilder::new()
    }

    /// Position/velocity system `A = [[1, 2], [0, 1]]`, `B = [[0.5], [1]]`,
    /// observing the full state.
    pub fn double_integrator() -> Self {
        Self {
            a: DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]),
            b: DMatrix::from_row_slice(2, 1, &[0.5, 1.0]),
            c: DMatrix::identity(2, 2),
        }
    }

    pub fn state_dim(&self) -> usize {
        self.a.nrows()
    }

    pub fn input_dim(&self) -> usize {
        self.b.ncols()
    }

    pub fn output_dim(&self) -> usize {
        self.c.nrows()
    }

    pub fn transition(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn control(&self) -> &DMatrix<f64> {
        &self.b
    }

    pub fn observation(&self) -> &DMatrix<f64> {
        &self.c
    }

    fn check_state(&self, state: &DVector<f64>) -> Result<(), ShapeError> {
        if state.len() != self.state_dim() {
            return Err(ShapeError::LengthMismatch {
                what: "state",
                expected: self.state_dim(),
                found: state.len(),
            });
        }
        Ok(())
    }

    fn check_input(&self, input: &DVector<f64>) -> Result<(), ShapeError> {
        if input.len() != self.input_dim() {
            return Err(ShapeError::LengthMismatch {
                what: "input",
                expected: self.input_dim(),
                found: input.len(),
            });
        }
        Ok(())
    }

    fn advance(&self, state: &DVector<f64>, input: &DVector<f64>) -> DVector<f64> {
        &self.a * state + &self.b * input
    }
}

impl StateMachine for LinearDynamicsSystem {
    type State = DVector<f64>;
    type Input = DVector<f64>;
    type Output = DVector<f64>;

    fn create_initial_state(&self) -> DVector<f64> {
        DVector::zeros(self.state_dim())
    }

    fn create_example_inputs(&self) -> Vec<DVector<f64>> {
        [0.1, 0.2, 0.3, 0.4]
            .into_iter()
            .map(|value| DVector::from_element(self.input_dim(), value))
            .collect()
    }

    fn step(
        &self,
        state: DVector<f64>,
        input: &DVector<f64>,
    ) -> Result<(DVector<f64>, DVector<f64>), ShapeError> {
        self.check_state(&state)?;
        self.check_input(input)?;

        let next = self.advance(&state, input);
        let output = &self.c * &next;
        Ok((next, output))
    }

    fn blockstep(
        &self,
        state: DVector<f64>,
        inputs: &[DVector<f64>],
    ) -> Result<(DVector<f64>, Vec<DVector<f64>>), ShapeError> {
        self.check_state(&state)?;
        for input in inputs {
            self.check_input(input)?;
        }
        if inputs.is_empty() {
            return Ok((state, Vec::new()));
        }

        let mut states = Vec::with_capacity(inputs.len());
        let mut current = state;
        for input in inputs {
            current = self.advance(&current, input);
            states.push(current.clone());
        }

        let outputs = &self.c * DMatrix::from_columns(&states);
        let outputs = outputs
            .column_iter()
            .map(|column| column.into_owned())
            .collect();

        Ok((current, outputs))
    }
}
