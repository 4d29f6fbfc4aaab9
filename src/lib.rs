//! Sort Trace - Sorting algorithms that narrate themselves.
//!
//! This crate implements five sorting algorithms as lazy step sequences:
//! each pull performs at most one elementary operation on a shared working
//! array and reports it as a [`Step`] (compare, swap, set, done). A paced
//! driver replays those steps for a view and can pause or stop between
//! steps without corrupting the array.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Playback configuration and working array generation
//! - `compute`: Step protocol, the algorithms and the name registry
//! - `animation`: Paced playback driver, trace recording and replay
//!
//! # Example
//!
//! ```rust,no_run
//! use sort_trace::{
//!     animation::{Driver, NullView},
//!     compute::AlgorithmRegistry,
//!     schema::{ArrayPattern, PlaybackConfig},
//! };
//!
//! let config = PlaybackConfig::default();
//! let mut data = ArrayPattern::Random { seed: Some(42) }.generate(config.size);
//!
//! let registry = AlgorithmRegistry::builtin();
//! let mut sequence = registry.start("merge", &mut data).unwrap();
//!
//! let driver = Driver::new(&config);
//! let control = driver.control(); // pause()/resume()/stop() from elsewhere
//! let outcome = driver.run(sequence.as_mut(), &mut NullView);
//!
//! println!("{:?} after {} steps", outcome.status, outcome.steps);
//! ```

pub mod animation;
pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use animation::{Driver, PlaybackControl, PlaybackOutcome, PlaybackStatus, PlaybackView};
pub use compute::{AlgorithmRegistry, BoxedSequence, SortError, Step, TraceSource};
pub use schema::{ArrayPattern, PlaybackConfig};
