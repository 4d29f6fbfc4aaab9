//! Top-down merge sort with an explicit call stack.

use super::{BoxedSequence, SortMachine, Step, StepSequence};

/// A pending call on the divide stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    l: usize,
    r: usize,
    /// Both halves are sorted; only the merge remains.
    halves_sorted: bool,
}

/// Merge of `[l, mid]` and `[mid + 1, r]` in progress.
#[derive(Debug)]
struct MergeState {
    l: usize,
    mid: usize,
    left: Vec<f64>,
    right: Vec<f64>,
    i: usize,
    j: usize,
    k: usize,
    /// Source chosen by the last comparison, written on the next pull.
    take_left: Option<bool>,
}

impl MergeState {
    fn new(data: &[f64], l: usize, mid: usize, r: usize) -> Self {
        Self {
            l,
            mid,
            left: data[l..=mid].to_vec(),
            right: data[mid + 1..=r].to_vec(),
            i: 0,
            j: 0,
            k: l,
            take_left: None,
        }
    }

    /// Write the next output element and describe the write.
    fn write(&mut self, data: &mut [f64], from_left: bool) -> Step {
        let value = if from_left {
            self.i += 1;
            self.left[self.i - 1]
        } else {
            self.j += 1;
            self.right[self.j - 1]
        };
        let index = self.k;
        data[index] = value;
        self.k += 1;
        Step::Set { index, value }
    }

    fn step(&mut self, data: &mut [f64]) -> Option<Step> {
        if let Some(from_left) = self.take_left.take() {
            return Some(self.write(data, from_left));
        }

        let left_remaining = self.i < self.left.len();
        let right_remaining = self.j < self.right.len();
        match (left_remaining, right_remaining) {
            (true, true) => {
                // Ties go left to keep the sort stable.
                self.take_left = Some(self.left[self.i] <= self.right[self.j]);
                Some(Step::compare(self.l + self.i, self.mid + 1 + self.j))
            }
            (true, false) => Some(self.write(data, true)),
            (false, true) => Some(self.write(data, false)),
            (false, false) => None,
        }
    }
}

/// Merge sort over a borrowed array.
///
/// The recursion is unrolled onto `stack`: a frame is split into its two
/// halves, then revisited for the merge once both halves are done.
#[derive(Debug)]
pub struct MergeSort<'a> {
    data: &'a mut [f64],
    stack: Vec<Frame>,
    merge: Option<MergeState>,
}

impl<'a> MergeSort<'a> {
    pub fn new(data: &'a mut [f64]) -> Self {
        let stack = if data.len() > 1 {
            vec![Frame {
                l: 0,
                r: data.len() - 1,
                halves_sorted: false,
            }]
        } else {
            Vec::new()
        };
        Self {
            data,
            stack,
            merge: None,
        }
    }
}

impl SortMachine for MergeSort<'_> {
    fn values(&self) -> &[f64] {
        self.data
    }

    fn advance(&mut self) -> Option<Step> {
        loop {
            if let Some(merge) = &mut self.merge {
                if let Some(step) = merge.step(self.data) {
                    return Some(step);
                }
                self.merge = None;
            }

            let frame = self.stack.pop()?;
            if frame.l >= frame.r {
                continue;
            }
            let mid = frame.l + (frame.r - frame.l) / 2;
            if frame.halves_sorted {
                self.merge = Some(MergeState::new(self.data, frame.l, mid, frame.r));
            } else {
                self.stack.push(Frame {
                    halves_sorted: true,
                    ..frame
                });
                self.stack.push(Frame {
                    l: mid + 1,
                    r: frame.r,
                    halves_sorted: false,
                });
                self.stack.push(Frame {
                    l: frame.l,
                    r: mid,
                    halves_sorted: false,
                });
            }
        }
    }
}

/// Start a merge sort trace.
pub fn merge_sort(data: &mut [f64]) -> BoxedSequence<'_> {
    StepSequence::new(MergeSort::new(data)).boxed()
}
