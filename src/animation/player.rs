//! Trace player for reading back recorded runs.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use super::format::{
    STEP_RECORD_SIZE, TraceHeader, decode_step, decode_values, decompress_block, read_block,
};
use crate::compute::Step;

/// Player for recorded trace files.
///
/// Usage:
/// ```ignore
/// let player = TracePlayer::open("run.srt")?;
/// println!("{} recorded {} steps", player.algorithm(), player.step_count());
///
/// for step in player.steps() {
///     let step = step?;
///     // Render step...
/// }
///
/// let sorted = player.replay()?;
/// ```
#[derive(Debug)]
pub struct TracePlayer {
    header: TraceHeader,
    initial: Vec<f64>,
    /// Decompressed step records.
    step_data: Vec<u8>,
}

impl TracePlayer {
    /// Open a trace file for playback.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header = TraceHeader::read_from(&mut reader)?;
        let compression = header.flags.compression;

        let element_count = usize::try_from(header.element_count).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Element count {} too large", header.element_count),
            )
        })?;
        let values = decompress_block(read_block(&mut reader)?, compression)?;
        let initial = decode_values(&values, element_count)?;

        let step_data = decompress_block(read_block(&mut reader)?, compression)?;
        let expected = usize::try_from(header.step_count)
            .ok()
            .and_then(|count| count.checked_mul(STEP_RECORD_SIZE));
        if expected != Some(step_data.len()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Step block holds {} bytes, header promises {} steps",
                    step_data.len(),
                    header.step_count
                ),
            ));
        }

        Ok(Self {
            header,
            initial,
            step_data,
        })
    }

    /// Get trace header.
    pub fn header(&self) -> &TraceHeader {
        &self.header
    }

    /// Registry key of the recorded algorithm.
    pub fn algorithm(&self) -> &str {
        &self.header.algorithm
    }

    /// Get total number of recorded steps.
    pub fn step_count(&self) -> u64 {
        self.header.step_count
    }

    /// Working array as it was before the first step.
    pub fn initial_values(&self) -> &[f64] {
        &self.initial
    }

    /// Read a specific step by index.
    pub fn read_step(&self, step_index: u64) -> io::Result<Step> {
        if step_index >= self.header.step_count {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Step index {} out of range ({} steps)",
                    step_index, self.header.step_count
                ),
            ));
        }
        let start = step_index as usize * STEP_RECORD_SIZE;
        decode_step(&self.step_data[start..start + STEP_RECORD_SIZE])
    }

    /// Create an iterator over all steps.
    pub fn steps(&self) -> StepIterator<'_> {
        StepIterator {
            player: self,
            current: 0,
        }
    }

    /// Rebuild the final array by applying every recorded step to a copy of
    /// the initial values.
    pub fn replay(&self) -> io::Result<Vec<f64>> {
        let mut values = self.initial.clone();
        for (i, step) in self.steps().enumerate() {
            let step = step?;
            if !step.in_bounds(values.len()) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Step {} references an index outside 0..{}", i, values.len()),
                ));
            }
            step.apply(&mut values);
        }
        Ok(values)
    }
}

/// Iterator over recorded steps.
pub struct StepIterator<'a> {
    player: &'a TracePlayer,
    current: u64,
}

impl<'a> Iterator for StepIterator<'a> {
    type Item = io::Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.player.step_count() {
            return None;
        }

        let result = self.player.read_step(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.player.step_count() - self.current) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for StepIterator<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::format::{CompressionType, TraceFlags, encode_step, write_block};
    use crate::animation::{RecorderConfig, TraceRecorder};
    use crate::compute::{AlgorithmRegistry, is_sorted};
    use std::fs;
    use tempfile::tempdir;

    fn record(path: &Path, algorithm: &str, input: &[f64], compression: CompressionType) {
        let registry = AlgorithmRegistry::builtin();
        let mut data = input.to_vec();
        let config = RecorderConfig {
            compression,
            ..Default::default()
        };
        let mut recorder = TraceRecorder::new(path, algorithm, &data, config).unwrap();
        for step in registry.start(algorithm, &mut data).unwrap() {
            recorder.record_step(&step);
        }
        recorder.finalize().unwrap();
    }

    #[test]
    fn test_player_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.srt");
        let input = vec![0.9, 0.4, 0.7, 0.1, 0.5];

        record(&path, "merge", &input, CompressionType::None);

        let player = TracePlayer::open(&path).unwrap();
        assert_eq!(player.algorithm(), "merge");
        assert_eq!(player.initial_values(), input.as_slice());

        let steps: Vec<Step> = player.steps().map(|s| s.unwrap()).collect();
        assert_eq!(steps.len() as u64, player.step_count());
        assert_eq!(steps.last(), Some(&Step::Done));

        let replayed = player.replay().unwrap();
        assert_eq!(replayed, vec![0.1, 0.4, 0.5, 0.7, 0.9]);
    }

    #[test]
    fn test_player_lz4_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lz4.srt");
        let input: Vec<f64> = (0..32).rev().map(|i| i as f64 / 32.0).collect();

        record(&path, "heap", &input, CompressionType::Lz4);

        let player = TracePlayer::open(&path).unwrap();
        assert!(player.header().flags.compression.is_available());
        assert!(is_sorted(&player.replay().unwrap()));
    }

    #[test]
    fn test_iterator_len_and_random_access() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("iter.srt");

        record(&path, "bubble", &[3.0, 1.0, 2.0], CompressionType::None);

        let player = TracePlayer::open(&path).unwrap();
        assert_eq!(player.steps().len() as u64, player.step_count());
        assert_eq!(player.read_step(0).unwrap(), Step::compare(0, 1));
        assert_eq!(player.read_step(1).unwrap(), Step::Swap { a: 0, b: 1 });
        assert!(player.read_step(player.step_count()).is_err());
    }

    #[test]
    fn test_replay_rejects_out_of_range_index() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.srt");

        let mut recorder =
            TraceRecorder::new(&path, "bubble", &[0.2, 0.1], RecorderConfig::default()).unwrap();
        recorder.record_step(&Step::Swap { a: 0, b: 5 });
        recorder.record_step(&Step::Done);
        recorder.finalize().unwrap();

        let player = TracePlayer::open(&path).unwrap();
        let err = player.replay().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_truncated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.srt");

        record(&path, "quick", &[0.5, 0.25], CompressionType::None);
        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() - STEP_RECORD_SIZE]).unwrap();

        assert!(TracePlayer::open(&path).is_err());
    }

    #[test]
    fn test_step_count_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mismatch.srt");

        record(&path, "quick", &[0.5, 0.25], CompressionType::None);

        // Append an extra record and patch the block length so only the
        // header count disagrees.
        let mut bytes = fs::read(&path).unwrap();
        let block_start = TraceHeader::SIZE + 8 + 2 * 8;
        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&bytes[block_start..block_start + 8]);
        let len = u64::from_le_bytes(len_bytes) + STEP_RECORD_SIZE as u64;
        bytes[block_start..block_start + 8].copy_from_slice(&len.to_le_bytes());
        encode_step(&Step::Done, &mut bytes);
        fs::write(&path, &bytes).unwrap();

        let err = TracePlayer::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    fn raw_header(element_count: u64, step_count: u64) -> Vec<u8> {
        let header = TraceHeader {
            algorithm: "quick".to_string(),
            element_count,
            step_count,
            flags: TraceFlags::default(),
        };
        let mut bytes = Vec::new();
        header.write_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_huge_block_length() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge_block.srt");

        let mut bytes = raw_header(2, 0);
        bytes.extend_from_slice(&u64::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 16]);
        fs::write(&path, &bytes).unwrap();

        let err = TracePlayer::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_huge_element_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge_elements.srt");

        let mut bytes = raw_header(u64::MAX / 4, 0);
        write_block(&mut bytes, &[0u8; 16]).unwrap();
        write_block(&mut bytes, &[]).unwrap();
        fs::write(&path, &bytes).unwrap();

        let err = TracePlayer::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_huge_step_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge_steps.srt");

        let mut bytes = raw_header(1, u64::MAX / 4);
        write_block(&mut bytes, &0.5f64.to_le_bytes()).unwrap();
        write_block(&mut bytes, &[0u8; STEP_RECORD_SIZE]).unwrap();
        fs::write(&path, &bytes).unwrap();

        let err = TracePlayer::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
