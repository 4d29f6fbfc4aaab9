//! Working array generation.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How a fresh working array is filled. All values lie in [0, 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArrayPattern {
    /// Uniform random values.
    Random {
        /// Random seed (None = fresh entropy each run).
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Evenly spaced ascending values.
    Sorted,
    /// Evenly spaced descending values.
    Reversed,
    /// Ascending values with a few random transpositions.
    NearlySorted {
        /// Number of random pair exchanges.
        swaps: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Random picks from a small set of evenly spaced levels.
    FewUnique {
        /// Number of distinct levels.
        distinct: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for ArrayPattern {
    fn default() -> Self {
        ArrayPattern::Random { seed: None }
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// `size` evenly spaced values in (0, 1), ascending.
fn ramp(size: usize) -> Vec<f64> {
    let step = 1.0 / (size + 1) as f64;
    (1..=size).map(|i| i as f64 * step).collect()
}

impl ArrayPattern {
    /// Check pattern parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ArrayPattern::FewUnique { distinct: 0, .. } => Err(ConfigError::InvalidDistinctCount),
            _ => Ok(()),
        }
    }

    /// Generate a fresh working array of `size` values.
    pub fn generate(&self, size: usize) -> Vec<f64> {
        match self {
            ArrayPattern::Random { seed } => {
                let mut rng = rng_for(*seed);
                (0..size).map(|_| rng.gen_range(0.0..1.0)).collect()
            }
            ArrayPattern::Sorted => ramp(size),
            ArrayPattern::Reversed => {
                let mut values = ramp(size);
                values.reverse();
                values
            }
            ArrayPattern::NearlySorted { swaps, seed } => {
                let mut values = ramp(size);
                if size > 1 {
                    let mut rng = rng_for(*seed);
                    for _ in 0..*swaps {
                        let a = rng.gen_range(0..size);
                        let b = rng.gen_range(0..size);
                        values.swap(a, b);
                    }
                }
                values
            }
            ArrayPattern::FewUnique { distinct, seed } => {
                let levels = (*distinct).max(1);
                let mut rng = rng_for(*seed);
                (0..size)
                    .map(|_| rng.gen_range(0..levels) as f64 / levels as f64)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_range(values: &[f64]) -> bool {
        values.iter().all(|&v| (0.0..1.0).contains(&v))
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let pattern = ArrayPattern::Random { seed: Some(7) };
        let a = pattern.generate(32);
        let b = pattern.generate(32);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
        assert!(in_unit_range(&a));
    }

    #[test]
    fn test_structured_patterns() {
        let sorted = ArrayPattern::Sorted.generate(5);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        assert!(in_unit_range(&sorted));

        let reversed = ArrayPattern::Reversed.generate(5);
        assert!(reversed.windows(2).all(|w| w[0] > w[1]));
        assert!(in_unit_range(&reversed));
    }

    #[test]
    fn test_nearly_sorted_is_a_permutation_of_ramp() {
        let pattern = ArrayPattern::NearlySorted {
            swaps: 3,
            seed: Some(11),
        };
        let mut values = pattern.generate(20);
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, ArrayPattern::Sorted.generate(20));
    }

    #[test]
    fn test_few_unique_levels() {
        let pattern = ArrayPattern::FewUnique {
            distinct: 4,
            seed: Some(3),
        };
        let values = pattern.generate(100);
        assert!(in_unit_range(&values));
        for v in values {
            assert!([0.0, 0.25, 0.5, 0.75].contains(&v));
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(ArrayPattern::default().generate(0).is_empty());
        assert_eq!(ArrayPattern::Reversed.generate(1).len(), 1);
        assert_eq!(
            ArrayPattern::NearlySorted {
                swaps: 5,
                seed: Some(1)
            }
            .generate(1)
            .len(),
            1
        );
    }

    #[test]
    fn test_json_tagging() {
        let pattern: ArrayPattern =
            serde_json::from_str(r#"{"type":"FewUnique","distinct":3}"#).unwrap();
        assert!(matches!(
            pattern,
            ArrayPattern::FewUnique {
                distinct: 3,
                seed: None
            }
        ));
    }
}
