//! RIFF/WAVE Container Module
//!
//! Binary-format layer between raw file bytes and audio segments:
//! - Chunk scanning over the top-level RIFF chunk list
//! - `fmt `/`data` chunk decoding and validation
//! - Minimal PCM WAV encoding

pub mod chunk;
pub mod decode;
pub mod encode;

pub use chunk::{scan_chunks, ChunkDescriptor, ChunkTag, MAX_CHUNKS, RIFF_HEADER_LEN};
pub use decode::{decode_format, decode_wav, DecodedFormat, FORMAT_EXTENSIBLE, FORMAT_PCM};
pub use encode::{encode_wav, write_wav, ExportFormat, InputFormat};

/// Read a little-endian u16 at `pos`. Callers guarantee the range is in bounds.
#[inline]
pub(crate) fn read_u16_le(data: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([data[pos], data[pos + 1]])
}

/// Read a little-endian u32 at `pos`. Callers guarantee the range is in bounds.
#[inline]
pub(crate) fn read_u32_le(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}
