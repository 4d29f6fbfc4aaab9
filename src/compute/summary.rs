//! Step statistics from draining a sequence to completion.

use serde::Serialize;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

use super::{AlgorithmEntry, AlgorithmRegistry, SortError, StepCounts, TraceSource};

/// Step counts for one full run of an algorithm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSummary {
    pub algorithm: String,
    /// Working array length.
    pub length: usize,
    pub compares: u64,
    pub swaps: u64,
    pub sets: u64,
    /// All steps including the terminal `Done`.
    pub total_steps: u64,
    /// Whether the array ended non-decreasing.
    pub sorted: bool,
}

/// Check if values are in non-decreasing order.
pub fn is_sorted(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Drain a sequence, counting every step.
pub fn drain_counts(sequence: &mut dyn TraceSource) -> StepCounts {
    let mut counts = StepCounts::default();
    for step in sequence {
        counts.record(&step);
    }
    counts
}

fn summarize_entry(entry: &AlgorithmEntry, input: &[f64]) -> TraceSummary {
    let mut data = input.to_vec();
    let (counts, total_steps) = {
        let mut sequence = (entry.factory)(&mut data);
        let counts = drain_counts(sequence.as_mut());
        (counts, sequence.steps_emitted())
    };

    TraceSummary {
        algorithm: entry.name.to_string(),
        length: data.len(),
        compares: counts.compares,
        swaps: counts.swaps,
        sets: counts.sets,
        total_steps,
        sorted: is_sorted(&data),
    }
}

/// Run one algorithm on a private copy of `input`.
pub fn summarize(
    registry: &AlgorithmRegistry,
    name: &str,
    input: &[f64],
) -> Result<TraceSummary, SortError> {
    let entry = registry.lookup(name)?;
    Ok(summarize_entry(entry, input))
}

/// Run every registered algorithm on independent copies of `input`.
///
/// Results follow registration order.
#[cfg(not(target_arch = "wasm32"))]
pub fn summarize_all(registry: &AlgorithmRegistry, input: &[f64]) -> Vec<TraceSummary> {
    registry
        .entries()
        .par_iter()
        .map(|entry| summarize_entry(entry, input))
        .collect()
}

#[cfg(target_arch = "wasm32")]
pub fn summarize_all(registry: &AlgorithmRegistry, input: &[f64]) -> Vec<TraceSummary> {
    registry
        .entries()
        .iter()
        .map(|entry| summarize_entry(entry, input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_all_sorts_everything() {
        let registry = AlgorithmRegistry::builtin();
        let input = vec![0.5, 0.125, 0.875, 0.25, 0.0, 0.75];

        let summaries = summarize_all(&registry, &input);
        assert_eq!(summaries.len(), 5);
        for (summary, name) in summaries.iter().zip(registry.names()) {
            assert_eq!(summary.algorithm, name);
            assert_eq!(summary.length, 6);
            assert!(summary.sorted, "{} left the array unsorted", name);
            assert_eq!(
                summary.total_steps,
                summary.compares + summary.swaps + summary.sets + 1
            );
        }
    }

    #[test]
    fn test_swap_and_set_algorithms_split() {
        let registry = AlgorithmRegistry::builtin();
        let input = vec![0.9, 0.1, 0.5, 0.3];

        let merge = summarize(&registry, "merge", &input).unwrap();
        assert_eq!(merge.swaps, 0);
        assert!(merge.sets > 0);

        let bubble = summarize(&registry, "bubble", &input).unwrap();
        assert_eq!(bubble.sets, 0);
        assert!(bubble.swaps > 0);
    }

    #[test]
    fn test_summarize_unknown() {
        let registry = AlgorithmRegistry::builtin();
        assert!(summarize(&registry, "shell", &[0.1]).is_err());
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[0.1, 0.1, 0.2]));
        assert!(!is_sorted(&[0.2, 0.1]));
    }
}
