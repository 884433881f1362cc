//! Immutable record of a machine run.
//!
//! A trajectory remembers every state a machine passed through together with
//! the output produced on the way in.

use super::machine::Value;
use serde::{Deserialize, Serialize};

/// One recorded moment: the state reached and the output emitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TrajectoryEntry<S: Value, O: Value> {
    /// State after the step
    pub state: S,
    /// Output produced by the step
    pub output: O,
}

/// Ordered, immutable sequence of recorded steps.
///
/// `record` returns a new trajectory and leaves the original untouched.
///
/// # Example
///
/// ```rust
/// use stepwise::core::Trajectory;
///
/// let empty: Trajectory<f64, f64> = Trajectory::new();
/// let one = empty.record(2.0, 2.0);
/// let two = one.record(8.0, 8.0);
///
/// assert!(empty.is_empty());
/// assert_eq!(one.len(), 1);
/// assert_eq!(two.states(), vec![&2.0, &8.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Trajectory<S: Value, O: Value> {
    entries: Vec<TrajectoryEntry<S, O>>,
}

impl<S: Value, O: Value> Default for Trajectory<S, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Value, O: Value> Trajectory<S, O> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a step, returning a new trajectory.
    pub fn record(&self, state: S, output: O) -> Self {
        let mut entries = self.entries.clone();
        entries.push(TrajectoryEntry { state, output });
        Self { entries }
    }

    /// Record a whole block, pairing each output with the state it led to.
    ///
    /// `states` and `outputs` are zipped; the shorter one bounds the result.
    pub fn record_block(&self, states: Vec<S>, outputs: Vec<O>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(
            states
                .into_iter()
                .zip(outputs)
                .map(|(state, output)| TrajectoryEntry { state, output }),
        );
        Self { entries }
    }

    /// States in the order they were reached.
    pub fn states(&self) -> Vec<&S> {
        self.entries.iter().map(|entry| &entry.state).collect()
    }

    /// Outputs in the order they were produced.
    pub fn outputs(&self) -> Vec<&O> {
        self.entries.iter().map(|entry| &entry.output).collect()
    }

    pub fn entries(&self) -> &[TrajectoryEntry<S, O>] {
        &self.entries
    }

    /// Most recently reached state, if any.
    pub fn last_state(&self) -> Option<&S> {
        self.entries.last().map(|entry| &entry.state)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trajectory_is_empty() {
        let trajectory: Trajectory<u64, u64> = Trajectory::new();
        assert!(trajectory.is_empty());
        assert!(trajectory.states().is_empty());
        assert!(trajectory.last_state().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let trajectory: Trajectory<u64, u64> = Trajectory::new();
        let recorded = trajectory.record(2, 2);

        assert_eq!(trajectory.len(), 0);
        assert_eq!(recorded.len(), 1);
    }

    #[test]
    fn record_block_zips_states_and_outputs() {
        let trajectory: Trajectory<u64, Option<u64>> = Trajectory::new()
            .record(1, None)
            .record_block(vec![2, 3], vec![None, Some(1)]);

        assert_eq!(trajectory.states(), vec![&1, &2, &3]);
        assert_eq!(trajectory.outputs(), vec![&None, &None, &Some(1)]);
        assert_eq!(trajectory.last_state(), Some(&3));
    }

    #[test]
    fn trajectory_serializes_correctly() {
        let trajectory: Trajectory<f64, f64> = Trajectory::new().record(2.0, 2.0).record(8.0, 8.0);

        let json = serde_json::to_string(&trajectory).unwrap();
        let deserialized: Trajectory<f64, f64> = serde_json::from_str(&json).unwrap();

        assert_eq!(trajectory, deserialized);
    }
}
