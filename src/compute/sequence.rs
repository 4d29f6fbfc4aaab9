//! Lazy step sequences over a borrowed working array.

use std::iter::FusedIterator;

use super::Step;

/// An algorithm expressed as a resumable state machine.
///
/// Each call to [`advance`](SortMachine::advance) performs at most one
/// mutation of the working array and returns the step describing it, so the
/// array never runs ahead of the steps already handed out.
pub trait SortMachine {
    /// Read-only view of the working array.
    fn values(&self) -> &[f64];

    /// Run until the next step. Returns `None` once the array is sorted.
    fn advance(&mut self) -> Option<Step>;
}

/// A single-use, forward-only sequence of steps.
pub trait TraceSource: Iterator<Item = Step> {
    /// Read-only view of the working array between pulls.
    fn values(&self) -> &[f64];

    /// Number of steps pulled so far, including `Done`.
    fn steps_emitted(&self) -> u64;
}

/// Type-erased sequence borrowing its working array for `'a`.
pub type BoxedSequence<'a> = Box<dyn TraceSource + 'a>;

/// Wraps a [`SortMachine`] and terminates it with exactly one [`Step::Done`].
#[derive(Debug)]
pub struct StepSequence<M> {
    machine: M,
    emitted: u64,
    finished: bool,
}

impl<M: SortMachine> StepSequence<M> {
    pub fn new(machine: M) -> Self {
        Self {
            machine,
            emitted: 0,
            finished: false,
        }
    }

    /// Check if `Done` has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Erase the machine type.
    pub fn boxed<'a>(self) -> BoxedSequence<'a>
    where
        M: 'a,
    {
        Box::new(self)
    }
}

impl<M: SortMachine> Iterator for StepSequence<M> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }
        let step = match self.machine.advance() {
            Some(step) => step,
            None => {
                self.finished = true;
                Step::Done
            }
        };
        self.emitted += 1;
        Some(step)
    }
}

impl<M: SortMachine> FusedIterator for StepSequence<M> {}

impl<M: SortMachine> TraceSource for StepSequence<M> {
    fn values(&self) -> &[f64] {
        self.machine.values()
    }

    fn steps_emitted(&self) -> u64 {
        self.emitted
    }
}
