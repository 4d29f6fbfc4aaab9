//! In-place heap sort on a binary max-heap.

use super::{BoxedSequence, SortMachine, Step, StepSequence};

/// Position inside a sift-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sift {
    /// Inspect the children of `node`.
    Children,
    /// Compare `node` with its larger child.
    Parent { child: usize },
    /// Exchange `node` with `child`, then continue from `child`.
    Exchange { child: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Sifting down internal nodes `next..=0`, last to first.
    Build { next: Option<usize> },
    /// Moving the root to `end` and re-heapifying `[0, end)`.
    Extract { end: usize },
    Finished,
}

/// Heap sort over a borrowed array.
#[derive(Debug)]
pub struct HeapSort<'a> {
    data: &'a mut [f64],
    phase: Phase,
    /// Active sift-down: current node, heap size and position.
    sift: Option<(usize, usize, Sift)>,
}

impl<'a> HeapSort<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        let n = data.len();
        let phase = if n < 2 {
            Phase::Finished
        } else {
            Phase::Build {
                next: Some(n / 2 - 1),
            }
        };
        Self {
            data,
            phase,
            sift: None,
        }
    }

    /// Advance the active sift-down by one step.
    fn sift_step(&mut self, node: usize, size: usize, at: Sift) -> Option<Step> {
        match at {
            Sift::Children => {
                let left = 2 * node + 1;
                if left >= size {
                    self.sift = None;
                    return None;
                }
                let right = left + 1;
                if right < size {
                    let larger = if self.data[right] > self.data[left] {
                        right
                    } else {
                        left
                    };
                    self.sift = Some((node, size, Sift::Parent { child: larger }));
                    return Some(Step::compare(left, right));
                }
                self.sift = Some((node, size, Sift::Parent { child: left }));
                self.sift_step(node, size, Sift::Parent { child: left })
            }
            Sift::Parent { child } => {
                self.sift = if self.data[child] > self.data[node] {
                    Some((node, size, Sift::Exchange { child }))
                } else {
                    None
                };
                Some(Step::compare(node, child))
            }
            Sift::Exchange { child } => {
                self.data.swap(node, child);
                self.sift = Some((child, size, Sift::Children));
                Some(Step::Swap { a: node, b: child })
            }
        }
    }
}

impl SortMachine for HeapSort<'_> {
    fn values(&self) -> &[f64] {
        self.data
    }

    fn advance(&mut self) -> Option<Step> {
        loop {
            if let Some((node, size, at)) = self.sift {
                if let Some(step) = self.sift_step(node, size, at) {
                    return Some(step);
                }
                continue;
            }

            match self.phase {
                Phase::Build { next: Some(node) } => {
                    self.phase = Phase::Build {
                        next: node.checked_sub(1),
                    };
                    self.sift = Some((node, self.data.len(), Sift::Children));
                }
                Phase::Build { next: None } => {
                    self.phase = Phase::Extract {
                        end: self.data.len() - 1,
                    };
                }
                Phase::Extract { end } => {
                    self.phase = if end > 1 {
                        Phase::Extract { end: end - 1 }
                    } else {
                        Phase::Finished
                    };
                    self.data.swap(0, end);
                    self.sift = Some((0, end, Sift::Children));
                    return Some(Step::Swap { a: 0, b: end });
                }
                Phase::Finished => return None,
            }
        }
    }
}

/// Start a heap sort trace.
pub fn heap_sort(data: &mut [f64]) -> BoxedSequence<'_> {
    StepSequence::new(HeapSort::new(data)).boxed()
}
