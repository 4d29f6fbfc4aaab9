//! Compute module - Trace-emitting sorting algorithms.
//!
//! Every algorithm borrows the working array mutably and hands out one
//! [`Step`] per pull. Swaps and writes are applied to the array on the same
//! pull that yields their step, never earlier.

mod bubble;
mod heap;
mod merge;
mod quick;
mod radix;
mod registry;
mod sequence;
mod step;
mod summary;


pub use bubble::*;
pub use heap::*;
pub use merge::*;
pub use quick::*;
pub use radix::*;
pub use registry::*;
pub use sequence::*;
pub use step::*;
pub use summary::*;
