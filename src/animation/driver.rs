//! Paced playback of a step sequence with pause and stop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::compute::{Step, StepCounts, TraceSource};
use crate::schema::PlaybackConfig;

/// Shared pause/stop flags for one run.
///
/// Clones share state, so a handle can be moved to another thread (or into
/// a view) while [`Driver::run`] blocks.
#[derive(Debug, Clone, Default)]
pub struct PlaybackControl {
    paused: Arc<AtomicBool>,
    stopped: Arc<AtomicBool>,
}

impl PlaybackControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold playback at the next step boundary.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Abandon the sequence. No further steps are pulled.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Visual hooks invoked for each step.
///
/// `values` is the working array after the step's mutation. All hooks
/// default to no-ops.
pub trait PlaybackView {
    /// Called for every step before the kind-specific hook.
    fn on_step(&mut self, _step: &Step, _values: &[f64]) {}

    fn on_compare(&mut self, _a: usize, _b: Option<usize>, _values: &[f64]) {}

    fn on_swap(&mut self, _a: usize, _b: usize, _values: &[f64]) {}

    fn on_set(&mut self, _index: usize, _value: f64, _values: &[f64]) {}

    fn on_done(&mut self, _values: &[f64]) {}
}

/// View that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl PlaybackView for NullView {}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackStatus {
    /// The sequence reached `Done`.
    Completed,
    /// Stopped externally; the array holds partial progress.
    Stopped,
}

/// Result of a playback run.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackOutcome {
    pub status: PlaybackStatus,
    /// Steps pulled, including `Done`.
    pub steps: u64,
    pub compares: u64,
    pub swaps: u64,
    pub sets: u64,
    pub elapsed_seconds: f64,
}

/// Per-run playback context.
///
/// Pulls one step at a time, hands it to the view and sleeps for the
/// configured delay. Pause and stop take effect at step boundaries only.
#[derive(Debug)]
pub struct Driver {
    delay: Duration,
    poll: Duration,
    control: PlaybackControl,
    counts: StepCounts,
    steps: u64,
}

impl Driver {
    /// Create a driver for a single run.
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.delay_ms),
            poll: Duration::from_millis(config.pause_poll_ms.max(1)),
            control: PlaybackControl::new(),
            counts: StepCounts::default(),
            steps: 0,
        }
    }

    /// Use an existing control handle instead of a fresh one.
    pub fn with_control(mut self, control: PlaybackControl) -> Self {
        self.control = control;
        self
    }

    /// Handle for pausing or stopping this run.
    pub fn control(&self) -> PlaybackControl {
        self.control.clone()
    }

    /// Block while paused. Returns false once stopped.
    fn wait_while_paused(&self) -> bool {
        loop {
            if self.control.is_stopped() {
                return false;
            }
            if !self.control.is_paused() {
                return true;
            }
            thread::sleep(self.poll);
        }
    }

    fn dispatch(step: &Step, values: &[f64], view: &mut dyn PlaybackView) {
        view.on_step(step, values);
        match *step {
            Step::Compare { a, b } => view.on_compare(a, b, values),
            Step::Swap { a, b } => view.on_swap(a, b, values),
            Step::Set { index, value } => view.on_set(index, value, values),
            Step::Done => view.on_done(values),
        }
    }

    /// Drive `sequence` until it finishes or the run is stopped.
    pub fn run(
        mut self,
        sequence: &mut dyn TraceSource,
        view: &mut dyn PlaybackView,
    ) -> PlaybackOutcome {
        let start = Instant::now();
        log::debug!(
            "Playback started ({} elements, {:?} per step)",
            sequence.values().len(),
            self.delay
        );

        let status = loop {
            if !self.wait_while_paused() {
                log::info!("Playback stopped after {} steps", self.steps);
                break PlaybackStatus::Stopped;
            }

            let Some(step) = sequence.next() else {
                break PlaybackStatus::Completed;
            };
            self.steps += 1;
            self.counts.record(&step);
            Self::dispatch(&step, sequence.values(), view);

            if step.is_done() {
                break PlaybackStatus::Completed;
            }
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        log::debug!(
            "Playback finished: {:?}, {} steps in {:.3}s",
            status,
            self.steps,
            elapsed
        );

        PlaybackOutcome {
            status,
            steps: self.steps,
            compares: self.counts.compares,
            swaps: self.counts.swaps,
            sets: self.counts.sets,
            elapsed_seconds: elapsed,
        }
    }
}
