//! Fluent construction of linear systems.

use super::LinearDynamicsSystem;
use crate::core::ConfigError;
use nalgebra::DMatrix;

/// Builder for [`LinearDynamicsSystem`].
///
/// # Example
///
/// ```rust
/// use nalgebra::DMatrix;
/// use stepwise::machines::LinearDynamicsSystem;
///
/// let system = LinearDynamicsSystem::builder()
///     .transition(DMatrix::identity(2, 2))
///     .control(DMatrix::from_row_slice(2, 1, &[0.0, 1.0]))
///     .observe_state()
///     .build()
///     .unwrap();
///
/// assert_eq!(system.output_dim(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LinearDynamicsBuilder {
    a: Option<DMatrix<f64>>,
    b: Option<DMatrix<f64>>,
    c: Option<DMatrix<f64>>,
    observe_state: bool,
}

impl LinearDynamicsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state transition matrix `A` (required).
    pub fn transition(mut self, a: DMatrix<f64>) -> Self {
        self.a = Some(a);
        self
    }

    /// Set the control matrix `B` (required).
    pub fn control(mut self, b: DMatrix<f64>) -> Self {
        self.b = Some(b);
        self
    }

    /// Set the output matrix `C`.
    pub fn observation(mut self, c: DMatrix<f64>) -> Self {
        self.c = Some(c);
        self.observe_state = false;
        self
    }

    /// Use the identity as `C`, so outputs are the full state.
    pub fn observe_state(mut self) -> Self {
        self.c = None;
        self.observe_state = true;
        self
    }

    /// Build the system.
    /// Returns an error if a matrix is missing or the matrices do not conform.
    pub fn build(self) -> Result<LinearDynamicsSystem, ConfigError> {
        let a = self.a.ok_or(ConfigError::MissingMatrix("A"))?;
        let b = self.b.ok_or(ConfigError::MissingMatrix("B"))?;
        let c = match self.c {
            Some(c) => c,
            None if self.observe_state => DMatrix::identity(a.nrows(), a.nrows()),
            None => return Err(ConfigError::MissingMatrix("C")),
        };

        LinearDynamicsSystem::new(a, b, c)
    }
}
