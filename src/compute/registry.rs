//! Name-keyed lookup of tracing algorithms.

use super::{BoxedSequence, bubble_sort, heap_sort, merge_sort, quick_sort, radix_sort};

/// Builds a step sequence over a borrowed working array.
pub type SequenceFactory = for<'a> fn(&'a mut [f64]) -> BoxedSequence<'a>;

/// Registry lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("Unknown sorting algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// A registered algorithm.
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmEntry {
    /// Stable selection key.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub factory: SequenceFactory,
}

/// Registry mapping stable keys to sequence factories.
///
/// Entries keep their registration order so listings are stable.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    entries: Vec<AlgorithmEntry>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the five built-in algorithms.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("bubble", "Bubble Sort", bubble_sort);
        registry.register("quick", "Quick Sort", quick_sort);
        registry.register("merge", "Merge Sort", merge_sort);
        registry.register("heap", "Heap Sort", heap_sort);
        registry.register("radix", "Radix Sort", radix_sort);
        registry
    }

    /// Add an algorithm, replacing any entry with the same key.
    pub fn register(
        &mut self,
        name: &'static str,
        label: &'static str,
        factory: SequenceFactory,
    ) {
        let entry = AlgorithmEntry {
            name,
            label,
            factory,
        };
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Find an algorithm by key.
    pub fn lookup(&self, name: &str) -> Result<&AlgorithmEntry, SortError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| SortError::UnknownAlgorithm(name.to_string()))
    }

    /// Check if a key is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Start a sequence for `name` over `data`.
    ///
    /// The array is untouched when the lookup fails.
    pub fn start<'a>(
        &self,
        name: &str,
        data: &'a mut [f64],
    ) -> Result<BoxedSequence<'a>, SortError> {
        let entry = self.lookup(name)?;
        log::debug!("Starting {} over {} elements", entry.label, data.len());
        Ok((entry.factory)(data))
    }

    /// Registered keys in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn entries(&self) -> &[AlgorithmEntry] {
        &self.entries
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
    use crate::compute::Step;

    #[test]
    fn test_builtin_names() {
        let registry = AlgorithmRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["bubble", "quick", "merge", "heap", "radix"]
        );
        assert_eq!(registry.lookup("heap").unwrap().label, "Heap Sort");
        assert!(registry.contains("radix"));
        assert!(!registry.contains("Radix"));
        assert!(!AlgorithmRegistry::new().contains("bubble"));
    }

    #[test]
    fn test_unknown_name_leaves_array_untouched() {
        let registry = AlgorithmRegistry::builtin();
        let mut data = vec![0.3, 0.1, 0.2];

        let err = registry.start("bogo", &mut data).err();
        assert_eq!(err, Some(SortError::UnknownAlgorithm("bogo".to_string())));
        assert_eq!(data, vec![0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_register_replaces_existing_key() {
        fn only_done(data: &mut [f64]) -> BoxedSequence<'_> {
            Box::new(crate::compute::StepSequence::new(Idle { data }))
        }

        struct Idle<'a> {
            data: &'a mut [f64],
        }

        impl crate::compute::SortMachine for Idle<'_> {
            fn values(&self) -> &[f64] {
                self.data
            }

            fn advance(&mut self) -> Option<Step> {
                None
            }
        }

        let mut registry = AlgorithmRegistry::builtin();
        registry.register("bubble", "Idle", only_done);
        assert_eq!(registry.len(), 5);

        let mut data = vec![0.2, 0.1];
        let steps: Vec<Step> = registry.start("bubble", &mut data).unwrap().collect();
        assert_eq!(steps, vec![Step::Done]);
        assert_eq!(data, vec![0.2, 0.1]);
    }

    #[test]
    fn test_start_runs_selected_algorithm() {
        let registry = AlgorithmRegistry::builtin();
        let mut data = vec![0.3, 0.1, 0.2];
        let steps: Vec<Step> = registry.start("bubble", &mut data).unwrap().collect();
        assert_eq!(steps[0], Step::compare(0, 1));
        assert_eq!(data, vec![0.1, 0.2, 0.3]);
    }
}
