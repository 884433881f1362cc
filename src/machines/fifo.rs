//! Bounded first-in first-out buffer.
//!
//! Pushing into a full buffer evicts the oldest element, which is reported
//! through the output channel. Eviction is normal behaviour, never an error.

use crate::container::{FromNumeric, Numeric, ToNumeric};
use crate::core::{ConfigError, ShapeError, StateMachine, Value};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::iter;
use tracing::debug;

/// Capacity used by the demonstration buffer.
pub const EXAMPLE_CAPACITY: usize = 5;

/// Buffer contents, oldest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FifoState<T> {
    items: VecDeque<T>,
}

impl<T> Default for FifoState<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> FifoState<T> {
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn fill_count(&self) -> usize {
        self.items.len()
    }

    /// Items from oldest to newest.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items.into()
    }
}

/// FIFO buffer of fixed capacity.
///
/// `step` outputs `None` while the buffer still has room and `Some(oldest)`
/// once every push has to evict. Any [`Value`] works as the element type;
/// buffers of types without a numeric sequence supply their example inputs
/// through [`FifoBuffer::with_examples`].
///
/// # Example
///
/// ```rust
/// use stepwise::core::StateMachine;
/// use stepwise::machines::FifoBuffer;
///
/// let fifo = FifoBuffer::<f64>::new(5).unwrap();
/// let (state, outputs) = fifo.blockstep(fifo.create_initial_state(), &[1.0, 2.0, 3.0]).unwrap();
/// assert!(FifoBuffer::evictions(&outputs).is_empty());
///
/// let (state, outputs) = fifo.blockstep(state, &[4.0, 5.0, 6.0, 7.0]).unwrap();
/// assert_eq!(FifoBuffer::evictions(&outputs), vec![1.0, 2.0]);
/// assert_eq!(state.into_vec(), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FifoBuffer<T> {
    capacity: usize,
    examples: Vec<T>,
}

impl<T: From<u8>> FifoBuffer<T> {
    /// Buffer whose example inputs are `1..=7`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_examples(capacity, (1..=7u8).map(T::from).collect())
    }
}

impl<T> FifoBuffer<T> {
    /// Buffer with caller-supplied example inputs, which must not be empty.
    pub fn with_examples(capacity: usize, examples: Vec<T>) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if examples.is_empty() {
            return Err(ConfigError::NoExamples);
        }
        Ok(Self { capacity, examples })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Compact a block of outputs into the elements actually evicted, in order.
    pub fn evictions(outputs: &[Option<T>]) -> Vec<T>
    where
        T: Clone,
    {
        outputs.iter().flatten().cloned().collect()
    }

    fn checked(&self, state: FifoState<T>) -> Result<FifoState<T>, ShapeError> {
        if state.fill_count() > self.capacity {
            return Err(ShapeError::OverCapacity {
                capacity: self.capacity,
                found: state.fill_count(),
            });
        }
        Ok(state)
    }
}

impl<T: Value> StateMachine for FifoBuffer<T> {
    type State = FifoState<T>;
    type Input = T;
    type Output = Option<T>;

    fn create_initial_state(&self) -> FifoState<T> {
        FifoState::default()
    }

    fn create_example_inputs(&self) -> Vec<T> {
        self.examples.clone()
    }

    fn step(&self, state: FifoState<T>, input: &T) -> Result<(FifoState<T>, Option<T>), ShapeError> {
        let mut items = self.checked(state)?.items;
        let evicted = if items.len() == self.capacity {
            items.pop_front()
        } else {
            None
        };
        items.push_back(input.clone());
        Ok((FifoState { items }, evicted))
    }

    fn blockstep(
        &self,
        state: FifoState<T>,
        inputs: &[T],
    ) -> Result<(FifoState<T>, Vec<Option<T>>), ShapeError> {
        let state = self.checked(state)?;
        let fill = state.fill_count();

        // Pushes that still fit emit nothing; every later push evicts the
        // oldest remaining element of `old ++ inputs`.
        let quiet = (self.capacity - fill).min(inputs.len());
        let evicted_count = (fill + inputs.len()).saturating_sub(self.capacity);

        let mut evicted: Vec<T> = state
            .items
            .into_iter()
            .chain(inputs.iter().cloned())
            .collect();
        let retained = evicted.split_off(evicted_count);

        if evicted_count > 0 {
            debug!(
                capacity = self.capacity,
                pushed = inputs.len(),
                evicted = evicted_count,
                "FIFO block overflowed"
            );
        }

        let outputs = iter::repeat_with(|| None)
            .take(quiet)
            .chain(evicted.into_iter().map(Some))
            .collect();

        Ok((
            FifoState {
                items: retained.into(),
            },
            outputs,
        ))
    }
}

impl ToNumeric for FifoState<f64> {
    fn to_numeric(&self) -> Numeric {
        Numeric::record([
            ("items", Numeric::Array(self.items.iter().copied().collect())),
            ("fill_count", Numeric::Scalar(self.fill_count() as f64)),
        ])
    }
}

impl FromNumeric for FifoState<f64> {
    fn from_numeric(value: &Numeric) -> Result<Self, ShapeError> {
        let fields = value.fields(&["items", "fill_count"])?;
        let items = fields["items"].as_array()?;
        let fill_count = u64::from_numeric(&fields["fill_count"])? as usize;
        if fill_count != items.len() {
            return Err(ShapeError::LengthMismatch {
                what: "FIFO items",
                expected: fill_count,
                found: items.len(),
            });
        }
        Ok(FifoState::from_items(items.iter().copied()))
    }
}
