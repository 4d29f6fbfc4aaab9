//! Configuration types for playback runs.

use serde::{Deserialize, Serialize};

use super::ArrayPattern;

/// Largest working array a configuration may request.
pub const MAX_ARRAY_SIZE: usize = 4096;

fn default_algorithm() -> String {
    "quick".to_string()
}

fn default_size() -> usize {
    64
}

fn default_delay_ms() -> u64 {
    20
}

fn default_pause_poll_ms() -> u64 {
    10
}

/// Top-level playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Registry key of the algorithm to run.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Number of elements in the working array.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Pause between steps in milliseconds (0 = as fast as possible).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// How often a paused driver re-checks its flags.
    #[serde(default = "default_pause_poll_ms")]
    pub pause_poll_ms: u64,
    /// How the working array is generated.
    #[serde(default)]
    pub pattern: ArrayPattern,
    /// Optional trace file to record the run into.
    #[serde(default)]
    pub record: Option<String>,
    /// Compression for recorded traces.
    #[serde(default)]
    pub compression: TraceCompression,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            size: default_size(),
            delay_ms: default_delay_ms(),
            pause_poll_ms: default_pause_poll_ms(),
            pattern: ArrayPattern::default(),
            record: None,
            compression: TraceCompression::default(),
        }
    }
}

/// Compression applied to recorded trace blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceCompression {
    #[default]
    None,
    Lz4,
}

impl PlaybackConfig {
    /// Config that replays without pacing, for tests and batch runs.
    pub fn unpaced() -> Self {
        Self {
            delay_ms: 0,
            pause_poll_ms: 1,
            ..Default::default()
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithm.trim().is_empty() {
            return Err(ConfigError::MissingAlgorithm);
        }
        if self.size > MAX_ARRAY_SIZE {
            return Err(ConfigError::ArrayTooLarge {
                size: self.size,
                max: MAX_ARRAY_SIZE,
            });
        }
        if self.pause_poll_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        self.pattern.validate()?;
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Algorithm name must not be empty")]
    MissingAlgorithm,
    #[error("Array size {size} exceeds the maximum of {max}")]
    ArrayTooLarge { size: usize, max: usize },
    #[error("Pause poll interval must be positive")]
    InvalidPollInterval,
    #[error("Few-unique pattern needs at least one distinct value")]
    InvalidDistinctCount,
}
