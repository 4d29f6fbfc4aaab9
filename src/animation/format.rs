//! Binary format definitions for recorded sort traces.

use std::io::{self, Read, Write};

use crate::compute::Step;
use crate::schema::TraceCompression;

/// Magic bytes identifying a sort trace file.
pub const TRACE_MAGIC: &[u8; 4] = b"SRTR";

/// Current format version.
pub const TRACE_VERSION: u16 = 1;

/// Bytes reserved for the algorithm key in the header.
pub const ALGORITHM_FIELD_SIZE: usize = 16;

/// Size of one encoded step: tag + two 8-byte payload slots.
pub const STEP_RECORD_SIZE: usize = 17;

const TAG_COMPARE: u8 = 0;
const TAG_SWAP: u8 = 1;
const TAG_SET: u8 = 2;
const TAG_DONE: u8 = 3;

/// Marks a missing second index in a compare record.
const NO_INDEX: u64 = u64::MAX;

/// Compression type for trace blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionType {
    /// No compression.
    #[default]
    None = 0,
    /// LZ4 fast compression.
    Lz4 = 1,
}

impl CompressionType {
    /// Whether this build can encode and decode this compression.
    pub fn is_available(self) -> bool {
        match self {
            CompressionType::None => true,
            CompressionType::Lz4 => cfg!(feature = "lz4"),
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(CompressionType::None),
            1 => Some(CompressionType::Lz4),
            _ => None,
        }
    }
}

impl From<TraceCompression> for CompressionType {
    fn from(value: TraceCompression) -> Self {
        match value {
            TraceCompression::None => CompressionType::None,
            TraceCompression::Lz4 => CompressionType::Lz4,
        }
    }
}

/// Trace file header flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceFlags {
    /// Compression type (lower 4 bits).
    pub compression: CompressionType,
}

impl TraceFlags {
    pub fn to_u16(self) -> u16 {
        self.compression as u16
    }

    pub fn from_u16(v: u16) -> Self {
        Self {
            compression: CompressionType::from_u8((v & 0x0F) as u8).unwrap_or_default(),
        }
    }
}

/// File header for the trace format.
#[derive(Debug, Clone)]
pub struct TraceHeader {
    /// Registry key of the recorded algorithm.
    pub algorithm: String,
    /// Working array length.
    pub element_count: u64,
    /// Number of step records.
    pub step_count: u64,
    pub flags: TraceFlags,
}

impl TraceHeader {
    /// Size of header in bytes.
    /// Magic(4) + Version(2) + Flags(2) + ElementCount(8) + StepCount(8) +
    /// Algorithm(16) + Reserved(8) = 48
    pub const SIZE: usize = 48;

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let name = self.algorithm.as_bytes();
        if name.len() > ALGORITHM_FIELD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Algorithm key '{}' longer than {} bytes",
                    self.algorithm, ALGORITHM_FIELD_SIZE
                ),
            ));
        }
        let mut name_field = [0u8; ALGORITHM_FIELD_SIZE];
        name_field[..name.len()].copy_from_slice(name);

        w.write_all(TRACE_MAGIC)?;
        w.write_all(&TRACE_VERSION.to_le_bytes())?;
        w.write_all(&self.flags.to_u16().to_le_bytes())?;
        w.write_all(&self.element_count.to_le_bytes())?;
        w.write_all(&self.step_count.to_le_bytes())?;
        w.write_all(&name_field)?;
        // Reserved bytes
        w.write_all(&[0u8; 8])?;
        Ok(())
    }

    /// Read header from input.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != TRACE_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid SRTR magic bytes",
            ));
        }

        let mut buf2 = [0u8; 2];
        let mut buf8 = [0u8; 8];

        r.read_exact(&mut buf2)?;
        let version = u16::from_le_bytes(buf2);
        if version != TRACE_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported SRTR version: {}", version),
            ));
        }

        r.read_exact(&mut buf2)?;
        let flags = TraceFlags::from_u16(u16::from_le_bytes(buf2));

        r.read_exact(&mut buf8)?;
        let element_count = u64::from_le_bytes(buf8);

        r.read_exact(&mut buf8)?;
        let step_count = u64::from_le_bytes(buf8);

        let mut name_field = [0u8; ALGORITHM_FIELD_SIZE];
        r.read_exact(&mut name_field)?;
        let name_len = name_field
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(ALGORITHM_FIELD_SIZE);
        let algorithm = std::str::from_utf8(&name_field[..name_len])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
            .to_string();

        // Skip reserved bytes
        let mut reserved = [0u8; 8];
        r.read_exact(&mut reserved)?;

        Ok(Self {
            algorithm,
            element_count,
            step_count,
            flags,
        })
    }
}

/// Append one step record to `out`.
pub fn encode_step(step: &Step, out: &mut Vec<u8>) {
    let (tag, first, second) = match *step {
        Step::Compare { a, b } => (
            TAG_COMPARE,
            a as u64,
            b.map_or(NO_INDEX, |b| b as u64),
        ),
        Step::Swap { a, b } => (TAG_SWAP, a as u64, b as u64),
        Step::Set { index, value } => (TAG_SET, index as u64, value.to_bits()),
        Step::Done => (TAG_DONE, 0, 0),
    };
    out.push(tag);
    out.extend_from_slice(&first.to_le_bytes());
    out.extend_from_slice(&second.to_le_bytes());
}

/// Decode one step record.
pub fn decode_step(bytes: &[u8]) -> io::Result<Step> {
    if bytes.len() != STEP_RECORD_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Step record size mismatch: {} bytes vs {}",
                bytes.len(),
                STEP_RECORD_SIZE
            ),
        ));
    }
    let slot = |start: usize| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[start..start + 8]);
        u64::from_le_bytes(buf)
    };
    let (first, second) = (slot(1), slot(9));

    match bytes[0] {
        TAG_COMPARE => Ok(Step::Compare {
            a: first as usize,
            b: (second != NO_INDEX).then_some(second as usize),
        }),
        TAG_SWAP => Ok(Step::Swap {
            a: first as usize,
            b: second as usize,
        }),
        TAG_SET => Ok(Step::Set {
            index: first as usize,
            value: f64::from_bits(second),
        }),
        TAG_DONE => Ok(Step::Done),
        tag => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Unknown step tag: {}", tag),
        )),
    }
}

/// Encode f64 slice to bytes.
pub fn encode_values(data: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len() * 8);
    for v in data {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode bytes to `count` f64 values.
pub fn decode_values(bytes: &[u8], count: usize) -> io::Result<Vec<f64>> {
    if count.checked_mul(8) != Some(bytes.len()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Value block size mismatch: {} bytes vs {} values",
                bytes.len(),
                count
            ),
        ));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        .collect())
}

/// Write a length-prefixed block.
pub fn write_block<W: Write>(w: &mut W, data: &[u8]) -> io::Result<()> {
    w.write_all(&(data.len() as u64).to_le_bytes())?;
    w.write_all(data)
}

/// Read a length-prefixed block.
pub fn read_block<R: Read>(r: &mut R) -> io::Result<Vec<u8>> {
    let mut buf8 = [0u8; 8];
    r.read_exact(&mut buf8)?;
    let len = u64::from_le_bytes(buf8);

    // The length is untrusted, so grow the buffer as bytes arrive.
    let mut data = Vec::new();
    let read = r.take(len).read_to_end(&mut data)?;
    if read as u64 != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Block truncated: {} of {} bytes", read, len),
        ));
    }
    Ok(data)
}

/// Apply the configured compression to a block.
pub fn compress_block(data: &[u8], compression: CompressionType) -> Vec<u8> {
    match compression {
        CompressionType::None => data.to_vec(),
        CompressionType::Lz4 => compress_lz4(data),
    }
}

/// Undo [`compress_block`].
pub fn decompress_block(data: Vec<u8>, compression: CompressionType) -> io::Result<Vec<u8>> {
    match compression {
        CompressionType::None => Ok(data),
        CompressionType::Lz4 => decompress_lz4(&data),
    }
}

/// Compress data using LZ4.
#[cfg(feature = "lz4")]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Decompress LZ4 data.
#[cfg(feature = "lz4")]
pub fn decompress_lz4(data: &[u8]) -> io::Result<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Fallback when LZ4 is not available. Callers must not flag the output as
/// LZ4; see [`CompressionType::is_available`].
#[cfg(not(feature = "lz4"))]
pub fn compress_lz4(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

#[cfg(not(feature = "lz4"))]
pub fn decompress_lz4(_data: &[u8]) -> io::Result<Vec<u8>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Trace is LZ4 compressed but LZ4 support is not compiled in",
    ))
}
