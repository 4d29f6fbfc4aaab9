//! Schema module - Configuration and array seeding for playback runs.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
