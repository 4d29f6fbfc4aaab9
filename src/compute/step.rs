//! Step descriptors emitted by the tracing algorithms.

use serde::{Deserialize, Serialize};

/// One elementary operation performed on the working array.
///
/// `Swap` and `Set` are notifications: by the time they are yielded the
/// mutation has already been applied to the array the algorithm borrows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Indices about to be compared. `b` is absent for single-index probes
    /// (partition scans, digit bucketing).
    Compare { a: usize, b: Option<usize> },
    /// Values at `a` and `b` have been exchanged.
    Swap { a: usize, b: usize },
    /// `index` has been overwritten with `value`.
    Set { index: usize, value: f64 },
    /// Terminal marker.
    Done,
}

/// Step type without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Compare,
    Swap,
    Set,
    Done,
}

impl Step {
    /// Two-index comparison.
    #[inline]
    pub fn compare(a: usize, b: usize) -> Self {
        Step::Compare { a, b: Some(b) }
    }

    /// Single-index probe.
    #[inline]
    pub fn probe(a: usize) -> Self {
        Step::Compare { a, b: None }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::Compare { .. } => StepKind::Compare,
            Step::Swap { .. } => StepKind::Swap,
            Step::Set { .. } => StepKind::Set,
            Step::Done => StepKind::Done,
        }
    }

    /// Check if this is the terminal marker.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }

    /// All array indices referenced by this step.
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Step::Compare { a, b } => std::iter::once(a).chain(b).collect(),
            Step::Swap { a, b } => vec![a, b],
            Step::Set { index, .. } => vec![index],
            Step::Done => Vec::new(),
        }
    }

    /// Check that every referenced index is below `len`.
    pub fn in_bounds(&self, len: usize) -> bool {
        self.indices().iter().all(|&i| i < len)
    }

    /// Re-apply this step's mutation to a separate copy of the array.
    ///
    /// Compare and done steps leave `values` untouched. Panics if an index
    /// is out of range; check with [`Step::in_bounds`] first when the step
    /// comes from an untrusted source.
    pub fn apply(&self, values: &mut [f64]) {
        match *self {
            Step::Swap { a, b } => values.swap(a, b),
            Step::Set { index, value } => values[index] = value,
            Step::Compare { .. } | Step::Done => {}
        }
    }
}

/// Step kind counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounts {
    pub compares: u64,
    pub swaps: u64,
    pub sets: u64,
}

impl StepCounts {
    /// Count a step.
    pub fn record(&mut self, step: &Step) {
        match step.kind() {
            StepKind::Compare => self.compares += 1,
            StepKind::Swap => self.swaps += 1,
            StepKind::Set => self.sets += 1,
            StepKind::Done => {}
        }
    }

    /// Total mutation and comparison steps (excludes `Done`).
    pub fn total(&self) -> u64 {
        self.compares + self.swaps + self.sets
    }
}
