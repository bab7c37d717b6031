//! Format Decoder
//!
//! Locates and validates the `fmt ` and `data` chunks found by the scanner
//! and produces a [`DecodedFormat`] owning the raw PCM bytes.

use log::{debug, warn};
use serde::Serialize;

use super::chunk::{scan_chunks, ChunkDescriptor, ChunkTag, RIFF_HEADER_LEN};
use super::{read_u16_le, read_u32_le};
use crate::error::{RiffcutError, Result};

/// WAVE_FORMAT_PCM
pub const FORMAT_PCM: u16 = 0x0001;

/// WAVE_FORMAT_EXTENSIBLE
pub const FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Minimum body size of a `fmt ` chunk
const MIN_FORMAT_CHUNK_LEN: usize = 16;

/// PCM description decoded from a WAV container
///
/// Built once from a validated chunk list and consumed once to construct an
/// [`AudioSegment`](crate::segment::AudioSegment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFormat {
    /// 1 for integer PCM, 0xFFFE for extensible
    pub format_code: u16,
    /// Interleaved channel count (>= 1)
    pub channel_count: u16,
    /// Frames per second (> 0)
    pub sample_rate: u32,
    /// Bits per sample, a multiple of 8
    pub bits_per_sample: u16,
    /// Body of the `data` chunk
    #[serde(skip)]
    pub sample_bytes: Vec<u8>,
}

impl DecodedFormat {
    /// Bytes per single-channel sample
    #[inline]
    pub fn sample_width(&self) -> u16 {
        self.bits_per_sample / 8
    }
}

/// Decode a complete WAV container
///
/// Checks the RIFF/WAVE preamble, scans the chunk list and decodes it.
///
/// # Errors
/// * `NotRiffWave` - If the preamble is missing
/// * Any error from [`decode_format`]
pub fn decode_wav(data: &[u8]) -> Result<DecodedFormat> {
    if data.len() < RIFF_HEADER_LEN || &data[0..4] != b"RIFF" || &data[8..12] != b"WAVE" {
        return Err(RiffcutError::NotRiffWave);
    }

    let chunks = scan_chunks(data);
    decode_format(data, &chunks)
}

/// Decode the PCM format and sample bytes from scanned chunk descriptors
///
/// # Arguments
/// * `data` - The full container bytes the descriptors were scanned from
/// * `chunks` - Output of [`scan_chunks`]
///
/// # Errors
/// * `MissingFormatChunk` - No `fmt ` chunk was scanned
/// * `TruncatedFormatChunk` - The `fmt ` body is shorter than 16 bytes
/// * `UnsupportedFormatCode` - Format code is neither PCM nor extensible
/// * `MissingDataChunk` - The last scanned chunk isn't `data`
/// * `TruncatedDataChunk` - The declared data range runs past the buffer
/// * `UnsupportedBitDepth` - 24-bit or any width other than 8/16/32
/// * `InvalidFormat` - Zero channels or zero sample rate
pub fn decode_format(data: &[u8], chunks: &[ChunkDescriptor]) -> Result<DecodedFormat> {
    let format = chunks
        .iter()
        .find(|c| c.tag == ChunkTag::FORMAT)
        .ok_or(RiffcutError::MissingFormatChunk)?;

    // Declared size alone isn't enough, the body must exist in the buffer too
    let pos = format.body_start();
    if (format.declared_size as usize) < MIN_FORMAT_CHUNK_LEN
        || data.len() < pos + MIN_FORMAT_CHUNK_LEN
    {
        return Err(RiffcutError::TruncatedFormatChunk {
            declared_size: format.declared_size,
        });
    }

    let format_code = read_u16_le(data, pos);
    let channel_count = read_u16_le(data, pos + 2);
    let sample_rate = read_u32_le(data, pos + 4);
    let bits_per_sample = read_u16_le(data, pos + 14);

    if format_code != FORMAT_PCM && format_code != FORMAT_EXTENSIBLE {
        return Err(RiffcutError::UnsupportedFormatCode(format_code));
    }

    let data_chunk = chunks
        .last()
        .filter(|c| c.tag == ChunkTag::DATA)
        .ok_or(RiffcutError::MissingDataChunk)?;

    let start = data_chunk.body_start();
    let end = start
        .checked_add(data_chunk.declared_size as usize)
        .filter(|&end| end <= data.len())
        .ok_or(RiffcutError::TruncatedDataChunk {
            offset: data_chunk.offset,
            declared_size: data_chunk.declared_size,
            available: data.len().saturating_sub(start),
        })?;

    if bits_per_sample == 24 {
        return Err(RiffcutError::UnsupportedBitDepth(24));
    }
    if !matches!(bits_per_sample, 8 | 16 | 32) {
        return Err(RiffcutError::UnsupportedBitDepth(bits_per_sample));
    }
    if channel_count == 0 {
        return Err(RiffcutError::InvalidFormat {
            reason: "channel count is 0".to_string(),
        });
    }
    if sample_rate == 0 {
        return Err(RiffcutError::InvalidFormat {
            reason: "sample rate is 0".to_string(),
        });
    }

    if end < data.len() {
        warn!("ignoring {} bytes after the data chunk", data.len() - end);
    }
    debug!(
        "decoded format 0x{:X}: {} ch, {} Hz, {}-bit, {} data bytes",
        format_code,
        channel_count,
        sample_rate,
        bits_per_sample,
        end - start
    );

    Ok(DecodedFormat {
        format_code,
        channel_count,
        sample_rate,
        bits_per_sample,
        sample_bytes: data[start..end].to_vec(),
    })
}
