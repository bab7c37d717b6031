//! Chunk Scanner
//!
//! Walks the top-level chunk list of a RIFF container. The scanner is total:
//! it never fails, and an empty result is reported by the decoder instead.

use std::fmt;

use log::debug;

use super::read_u32_le;

/// Length of the `RIFF <size> WAVE` preamble preceding the first chunk
pub const RIFF_HEADER_LEN: usize = 12;

/// Length of a chunk header (4-byte tag + 4-byte little-endian size)
pub const CHUNK_HEADER_LEN: usize = 8;

/// Upper bound on scanned chunks, guards against corrupt size fields
pub const MAX_CHUNKS: usize = 10;

/// Four-character chunk identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag(pub [u8; 4]);

impl ChunkTag {
    pub const FORMAT: ChunkTag = ChunkTag(*b"fmt ");
    pub const DATA: ChunkTag = ChunkTag(*b"data");

    /// Build a tag from the four bytes at `pos`
    fn at(data: &[u8], pos: usize) -> Self {
        ChunkTag([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Location of one chunk inside the container buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    /// Chunk identifier
    pub tag: ChunkTag,
    /// Byte position of the chunk header (body starts at `offset + 8`)
    pub offset: usize,
    /// Body size as declared in the header, unchecked against the buffer
    pub declared_size: u32,
}

impl ChunkDescriptor {
    /// Byte position where the chunk body starts
    #[inline]
    pub fn body_start(&self) -> usize {
        self.offset + CHUNK_HEADER_LEN
    }
}

/// Scan the top-level chunks of a RIFF container
///
/// Starts right after the 12-byte RIFF/WAVE preamble and stops after the
/// `data` chunk (which is included), when fewer than 8 bytes remain, or
/// once [`MAX_CHUNKS`] descriptors have been produced.
///
/// # Arguments
/// * `data` - The full container bytes
///
/// # Returns
/// Chunk descriptors in file order, possibly empty
pub fn scan_chunks(data: &[u8]) -> Vec<ChunkDescriptor> {
    let mut chunks = Vec::with_capacity(2);
    let mut pos = RIFF_HEADER_LEN;

    while chunks.len() < MAX_CHUNKS && data.len().saturating_sub(pos) >= CHUNK_HEADER_LEN {
        let tag = ChunkTag::at(data, pos);
        let declared_size = read_u32_le(data, pos + 4);
        debug!("chunk '{}' at {} ({} bytes)", tag, pos, declared_size);

        chunks.push(ChunkDescriptor {
            tag,
            offset: pos,
            declared_size,
        });

        if tag == ChunkTag::DATA {
            break;
        }

        // A size that overflows the address space can't be followed
        match pos
            .checked_add(CHUNK_HEADER_LEN)
            .and_then(|p| p.checked_add(declared_size as usize))
        {
            Some(next) => pos = next,
            None => break,
        }
    }

    chunks
}
