//! Digit sort: LSD radix sort on fixed-point values.
//!
//! Values are scaled by [`RADIX_SCALE`] and truncated to integers, then
//! bucketed one decimal digit at a time. Every pass writes the whole array
//! back as `k / RADIX_SCALE`, so precision beyond three decimals is dropped.

use super::{BoxedSequence, SortMachine, Step, StepSequence};

/// Fixed-point scale: three decimal digits of resolution.
pub const RADIX_SCALE: u64 = 1000;

const BASE: u64 = 10;

/// Scale a value to its fixed-point integer. Negative values clamp to zero.
#[inline]
pub fn to_fixed(value: f64) -> u64 {
    (value.max(0.0) * RADIX_SCALE as f64).floor() as u64
}

/// Convert a fixed-point integer back to the value domain.
#[inline]
pub fn from_fixed(scaled: u64) -> f64 {
    scaled as f64 / RADIX_SCALE as f64
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    /// Distributing element `next` into its bucket.
    Bucketing { next: usize },
    /// Writing the concatenated buckets back, position `next`.
    Writing { next: usize },
    Finished,
}

/// LSD radix sort over a borrowed array.
#[derive(Debug)]
pub struct RadixSort<'a> {
    data: &'a mut [f64],
    /// Fixed-point mirror of `data`, in current pass order.
    scaled: Vec<u64>,
    buckets: [Vec<u64>; BASE as usize],
    max: u64,
    exp: u64,
    phase: Phase,
}

impl<'a> RadixSort<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        let scaled: Vec<u64> = data.iter().map(|&v| to_fixed(v)).collect();
        let max = scaled.iter().copied().max().unwrap_or(0);
        let phase = if data.len() < 2 {
            Phase::Finished
        } else {
            Phase::Bucketing { next: 0 }
        };
        Self {
            data,
            scaled,
            buckets: Default::default(),
            max,
            exp: 1,
            phase,
        }
    }

    fn digit(&self, value: u64) -> usize {
        ((value / self.exp) % BASE) as usize
    }

    /// Check if `max` still has digits at or above the next position.
    fn more_passes(&self) -> bool {
        self.exp
            .checked_mul(BASE)
            .is_some_and(|next| self.max / next > 0)
    }
}

impl SortMachine for RadixSort<'_> {
    fn values(&self) -> &[f64] {
        self.data
    }

    fn advance(&mut self) -> Option<Step> {
        let n = self.data.len();
        loop {
            match self.phase {
                Phase::Bucketing { next } if next < n => {
                    let value = self.scaled[next];
                    let digit = self.digit(value);
                    self.buckets[digit].push(value);
                    self.phase = Phase::Bucketing { next: next + 1 };
                    return Some(Step::probe(next));
                }
                Phase::Bucketing { .. } => {
                    self.scaled.clear();
                    for bucket in &mut self.buckets {
                        self.scaled.append(bucket);
                    }
                    self.phase = Phase::Writing { next: 0 };
                }
                Phase::Writing { next } if next < n => {
                    let value = from_fixed(self.scaled[next]);
                    self.data[next] = value;
                    self.phase = Phase::Writing { next: next + 1 };
                    return Some(Step::Set { index: next, value });
                }
                Phase::Writing { .. } => {
                    if self.more_passes() {
                        self.exp *= BASE;
                        self.phase = Phase::Bucketing { next: 0 };
                    } else {
                        self.phase = Phase::Finished;
                    }
                }
                Phase::Finished => return None,
            }
        }
    }
}

/// Start a radix sort trace.
pub fn radix_sort(data: &mut [f64]) -> BoxedSequence<'_> {
    StepSequence::new(RadixSort::new(data)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_conversion() {
        assert_eq!(to_fixed(0.1), 100);
        assert_eq!(to_fixed(0.02), 20);
        assert_eq!(to_fixed(0.3), 300);
        assert_eq!(to_fixed(0.9999), 999);
        assert_eq!(to_fixed(-0.5), 0);
        assert_eq!(from_fixed(250), 0.25);
    }

    #[test]
    fn test_three_values() {
        let mut data = vec![0.1, 0.02, 0.3];
        let _ = radix_sort(&mut data).count();
        let expected = [0.02, 0.1, 0.3];
        for (got, want) in data.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} vs {want}");
        }
    }

    #[test]
    fn test_pass_count_follows_max_digits() {
        // max = 300 -> three digit positions, n probes and n sets each.
        let mut data = vec![0.1, 0.02, 0.3];
        let steps: Vec<Step> = radix_sort(&mut data).collect();
        let probes = steps
            .iter()
            .filter(|s| matches!(s, Step::Compare { b: None, .. }))
            .count();
        let sets = steps
            .iter()
            .filter(|s| matches!(s, Step::Set { .. }))
            .count();
        assert_eq!(probes, 9);
        assert_eq!(sets, 9);
    }

    #[test]
    fn test_all_below_resolution_still_normalizes() {
        let mut data = vec![0.0005, 0.0001];
        let steps: Vec<Step> = radix_sort(&mut data).collect();
        assert_eq!(data, vec![0.0, 0.0]);
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_truncates_extra_precision() {
        let mut data = vec![0.12345, 0.0019];
        let _ = radix_sort(&mut data).count();
        assert_eq!(data, vec![from_fixed(1), from_fixed(123)]);
    }
}
