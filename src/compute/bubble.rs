//! Exchange sort (bubble sort with early exit).

use super::{BoxedSequence, SortMachine, Step, StepSequence};

/// Bubble sort over a borrowed array.
///
/// Pass `i` compares `j, j + 1` for `j` in `0..n - 1 - i`. A pass without
/// exchanges ends the run.
#[derive(Debug)]
pub struct BubbleSort<'a> {
    data: &'a mut [f64],
    pass: usize,
    j: usize,
    swapped: bool,
    pending_swap: Option<usize>,
}

impl<'a> BubbleSort<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        Self {
            data,
            pass: 0,
            j: 0,
            swapped: false,
            pending_swap: None,
        }
    }
}

impl SortMachine for BubbleSort<'_> {
    fn values(&self) -> &[f64] {
        self.data
    }

    fn advance(&mut self) -> Option<Step> {
        if let Some(j) = self.pending_swap.take() {
            self.data.swap(j, j + 1);
            self.swapped = true;
            return Some(Step::Swap { a: j, b: j + 1 });
        }

        let n = self.data.len();
        loop {
            if n < 2 || self.pass >= n {
                return None;
            }
            if self.j + 1 < n - self.pass {
                let j = self.j;
                self.j += 1;
                if self.data[j] > self.data[j + 1] {
                    self.pending_swap = Some(j);
                }
                return Some(Step::compare(j, j + 1));
            }
            if !self.swapped {
                self.pass = n;
                continue;
            }
            self.pass += 1;
            self.j = 0;
            self.swapped = false;
        }
    }
}

/// Start a bubble sort trace.
pub fn bubble_sort(data: &mut [f64]) -> BoxedSequence<'_> {
    StepSequence::new(BubbleSort::new(data)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_elements() {
        let mut data = vec![3.0, 1.0, 2.0];
        let steps: Vec<Step> = bubble_sort(&mut data).collect();

        assert_eq!(steps[0], Step::compare(0, 1));
        assert_eq!(steps[1], Step::Swap { a: 0, b: 1 });
        assert_eq!(steps.last(), Some(&Step::Done));
        assert_eq!(data, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_early_exit_on_sorted_input() {
        let mut data = vec![0.1, 0.2, 0.3, 0.4];
        let steps: Vec<Step> = bubble_sort(&mut data).collect();

        // One pass of three comparisons, no swaps.
        assert_eq!(
            steps,
            vec![
                Step::compare(0, 1),
                Step::compare(1, 2),
                Step::compare(2, 3),
                Step::Done
            ]
        );
    }

    #[test]
    fn test_equal_elements_never_swap() {
        let mut data = vec![0.5, 0.5, 0.5];
        let swaps = bubble_sort(&mut data)
            .filter(|s| matches!(s, Step::Swap { .. }))
            .count();
        assert_eq!(swaps, 0);
    }

    #[test]
    fn test_compare_precedes_mutation() {
        let mut data = vec![3.0, 1.0, 2.0];
        {
            let mut seq = bubble_sort(&mut data);
            assert_eq!(seq.next(), Some(Step::compare(0, 1)));
            assert_eq!(seq.values(), &[3.0, 1.0, 2.0]);
        }
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }
}
