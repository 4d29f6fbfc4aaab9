//! Trace recorder for capturing a run's steps.

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use super::format::{
    CompressionType, STEP_RECORD_SIZE, TraceFlags, TraceHeader, compress_block, encode_step,
    encode_values, write_block,
};
use crate::compute::Step;

/// Configuration for trace recording.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Compression type to use.
    pub compression: CompressionType,
    /// Maximum steps to record (0 = unlimited).
    pub max_steps: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::None,
            max_steps: 0,
        }
    }
}

/// Recorder that writes a run's initial array and step trace to a file.
///
/// Usage:
/// ```ignore
/// let mut recorder = TraceRecorder::new("run.srt", "quick", &data, Default::default())?;
/// for step in registry.start("quick", &mut data)? {
///     recorder.record_step(&step);
/// }
/// recorder.finalize()?;
/// ```
pub struct TraceRecorder {
    writer: BufWriter<File>,
    header: TraceHeader,
    config: RecorderConfig,
    /// Encoded step records, compressed as one block on finalize.
    step_buffer: Vec<u8>,
}

impl TraceRecorder {
    /// Create a recorder and write the initial array.
    pub fn new<P: AsRef<Path>>(
        path: P,
        algorithm: &str,
        initial: &[f64],
        mut config: RecorderConfig,
    ) -> io::Result<Self> {
        if !config.compression.is_available() {
            log::warn!(
                "{:?} compression is not compiled in, recording trace uncompressed",
                config.compression
            );
            config.compression = CompressionType::None;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        let header = TraceHeader {
            algorithm: algorithm.to_string(),
            element_count: initial.len() as u64,
            step_count: 0, // Will be updated on finalize
            flags: TraceFlags {
                compression: config.compression,
            },
        };

        // Write placeholder header
        header.write_to(&mut writer)?;
        write_block(
            &mut writer,
            &compress_block(&encode_values(initial), config.compression),
        )?;

        Ok(Self {
            writer,
            header,
            config,
            step_buffer: Vec::new(),
        })
    }

    /// Record a step.
    ///
    /// Returns false once `max_steps` has been reached.
    pub fn record_step(&mut self, step: &Step) -> bool {
        if self.config.max_steps > 0 && self.steps_written() >= self.config.max_steps {
            return false;
        }
        encode_step(step, &mut self.step_buffer);
        true
    }

    /// Number of steps recorded so far.
    pub fn steps_written(&self) -> u64 {
        (self.step_buffer.len() / STEP_RECORD_SIZE) as u64
    }

    /// Finalize the trace file.
    ///
    /// Writes the step block and updates the header with the final count.
    pub fn finalize(mut self) -> io::Result<TraceStats> {
        let steps = compress_block(&self.step_buffer, self.header.flags.compression);
        write_block(&mut self.writer, &steps)?;
        let total_bytes = self.writer.stream_position()?;

        // Seek back and rewrite header
        self.header.step_count = self.steps_written();
        self.writer.seek(SeekFrom::Start(0))?;
        self.header.write_to(&mut self.writer)?;

        self.writer.flush()?;
        log::debug!(
            "Recorded {} steps of {} ({} bytes)",
            self.header.step_count,
            self.header.algorithm,
            total_bytes
        );

        Ok(TraceStats {
            step_count: self.header.step_count,
            total_bytes,
            compression: self.header.flags.compression,
        })
    }
}

/// Statistics from a recording session.
#[derive(Debug, Clone)]
pub struct TraceStats {
    /// Total steps recorded.
    pub step_count: u64,
    /// Total file size in bytes.
    pub total_bytes: u64,
    /// Compression used.
    pub compression: CompressionType,
}

impl std::fmt::Display for TraceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} steps, {} bytes total ({:?} compression)",
            self.step_count, self.total_bytes, self.compression
        )
    }
}
