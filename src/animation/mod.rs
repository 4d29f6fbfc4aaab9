//! Playback and recording of sort traces.
//!
//! [`Driver`] paces a live step sequence for a view. Runs can also be
//! captured with [`TraceRecorder`] and read back with [`TracePlayer`].
//!
//! # File Format
//!
//! The `.srt` (sort trace) format stores the initial array followed by the
//! step records, each block optionally compressed:
//!
//! ```text
//! Header (48 bytes):
//!   Magic: "SRTR" (4 bytes)
//!   Version: u16
//!   Flags: u16 (compression)
//!   Element count: u64
//!   Step count: u64
//!   Algorithm key: 16 bytes, zero padded
//!   Reserved: 8 bytes
//!
//! Initial values block:
//!   Size: u64
//!   element_count * 8 bytes (f64), optionally LZ4 compressed
//!
//! Step block:
//!   Size: u64
//!   step_count * 17 bytes (tag u8, two u64 slots), optionally LZ4 compressed
//! ```

mod driver;
mod format;
mod player;
mod recorder;

pub use driver::{
    Driver, NullView, PlaybackControl, PlaybackOutcome, PlaybackStatus, PlaybackView,
};
pub use format::{
    CompressionType, STEP_RECORD_SIZE, TRACE_MAGIC, TRACE_VERSION, TraceFlags, TraceHeader,
};
pub use player::{StepIterator, TracePlayer};
pub use recorder::{RecorderConfig, TraceRecorder, TraceStats};
