//! Container Encoder
//!
//! Serializes an audio segment into a minimal RIFF/WAVE byte stream:
//! 12-byte preamble, 16-byte `fmt ` chunk, `data` chunk.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use super::decode::FORMAT_PCM;
use crate::error::{RiffcutError, Result};
use crate::segment::AudioSegment;

/// Size of the preamble plus `fmt ` and `data` chunk headers
const WAV_HEADER_LEN: usize = 44;

/// Output container formats
///
/// Parsed from a format tag such as `"wav"`. Unknown tags fail explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Uncompressed integer PCM WAV
    #[default]
    Wav,
}

impl FromStr for ExportFormat {
    type Err = RiffcutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(ExportFormat::Wav),
            _ => Err(RiffcutError::UnsupportedOutputFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Wav => write!(f, "wav"),
        }
    }
}

/// Input container formats accepted by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Wav,
}

impl FromStr for InputFormat {
    type Err = RiffcutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wav" => Ok(InputFormat::Wav),
            _ => Err(RiffcutError::UnsupportedInputFormat {
                format: s.to_string(),
            }),
        }
    }
}

/// Encode a segment as a complete WAV file in memory
///
/// # Errors
/// * `DataTooLarge` - If the PCM data doesn't fit the 32-bit RIFF size fields
pub fn encode_wav(segment: &AudioSegment) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(WAV_HEADER_LEN + segment.byte_len() + 1);
    write_wav(&mut out, segment)?;
    Ok(out)
}

/// Write a segment as a WAV file to any byte sink
///
/// An odd-length data body is followed by a pad byte, which is counted in
/// the RIFF size but not in the data chunk size.
///
/// # Errors
/// * `DataTooLarge` - If the PCM data doesn't fit the 32-bit RIFF size fields
/// * `Io` - If the sink fails
pub fn write_wav<W: Write>(writer: &mut W, segment: &AudioSegment) -> Result<()> {
    let data = segment.raw_data();
    let pad = data.len() % 2;

    let data_size = u32::try_from(data.len())
        .ok()
        .filter(|size| size.checked_add(36 + pad as u32).is_some())
        .ok_or(RiffcutError::DataTooLarge { len: data.len() })?;
    let riff_size = 36 + data_size + pad as u32;

    let channels = segment.channels();
    let sample_rate = segment.frame_rate();
    let block_align = segment.frame_width();
    let byte_rate = sample_rate
        .checked_mul(block_align as u32)
        .ok_or_else(|| RiffcutError::InvalidFormat {
            reason: format!("byte rate overflows for {} Hz x {} bytes", sample_rate, block_align),
        })?;
    let bits_per_sample = segment.sample_width() * 8;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&FORMAT_PCM.to_le_bytes())?;
    writer.write_all(&channels.to_le_bytes())?;
    writer.write_all(&sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(data)?;
    if pad == 1 {
        writer.write_all(&[0])?;
    }

    Ok(())
}
