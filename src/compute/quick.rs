//! Partition sort: iterative quicksort with a middle pivot.

use super::{BoxedSequence, SortMachine, Step, StepSequence};

/// Where the partition loop resumes on the next pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Pop the next range off the stack.
    Pop,
    /// Head of the `while i <= j` loop.
    Partition,
    /// Probe `i` against the pivot.
    ScanLeft,
    /// Probe `j` against the pivot.
    ScanRight,
    /// Exchange `i` and `j` if they have not crossed.
    Exchange,
}

/// Hoare-style quicksort driven by an explicit range stack.
///
/// The pivot is always the value at the middle of the current range, so
/// the trace is fully determined by the input.
#[derive(Debug)]
pub struct QuickSort<'a> {
    data: &'a mut [f64],
    stack: Vec<(usize, usize)>,
    phase: Phase,
    range: (usize, usize),
    pivot: f64,
    // Signed: `j` may step one below `l` when the range starts at zero.
    i: isize,
    j: isize,
}

impl<'a> QuickSort<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        let stack = if data.len() > 1 {
            vec![(0, data.len() - 1)]
        } else {
            Vec::new()
        };
        Self {
            data,
            stack,
            phase: Phase::Pop,
            range: (0, 0),
            pivot: 0.0,
            i: 0,
            j: 0,
        }
    }

    /// Queue both halves of a finished partition.
    fn push_subranges(&mut self) {
        let (l, r) = self.range;
        if (l as isize) < self.j {
            self.stack.push((l, self.j as usize));
        }
        if self.i < r as isize {
            self.stack.push((self.i as usize, r));
        }
    }
}

impl SortMachine for QuickSort<'_> {
    fn values(&self) -> &[f64] {
        self.data
    }

    fn advance(&mut self) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Pop => {
                    let (l, r) = self.stack.pop()?;
                    if l >= r {
                        continue;
                    }
                    self.range = (l, r);
                    self.pivot = self.data[l + (r - l) / 2];
                    self.i = l as isize;
                    self.j = r as isize;
                    self.phase = Phase::Partition;
                }
                Phase::Partition => {
                    if self.i <= self.j {
                        self.phase = Phase::ScanLeft;
                    } else {
                        self.push_subranges();
                        self.phase = Phase::Pop;
                    }
                }
                Phase::ScanLeft => {
                    let i = self.i as usize;
                    if self.data[i] < self.pivot {
                        self.i += 1;
                    } else {
                        self.phase = Phase::ScanRight;
                    }
                    return Some(Step::probe(i));
                }
                Phase::ScanRight => {
                    let j = self.j as usize;
                    if self.data[j] > self.pivot {
                        self.j -= 1;
                    } else {
                        self.phase = Phase::Exchange;
                    }
                    return Some(Step::probe(j));
                }
                Phase::Exchange => {
                    self.phase = Phase::Partition;
                    if self.i <= self.j {
                        let (a, b) = (self.i as usize, self.j as usize);
                        self.data.swap(a, b);
                        self.i += 1;
                        self.j -= 1;
                        return Some(Step::Swap { a, b });
                    }
                }
            }
        }
    }
}

/// Start a quicksort trace.
pub fn quick_sort(data: &mut [f64]) -> BoxedSequence<'_> {
    StepSequence::new(QuickSort::new(data)).boxed()
}
