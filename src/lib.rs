//! Riffcut - PCM WAV Segment Editing
//!
//! Decodes a PCM WAV container into an in-memory [`AudioSegment`], slices and
//! joins segments with millisecond addressing, crossfades them, and encodes
//! the result back to WAV.
//!
//! # Architecture
//!
//! Data flows through two layers:
//! - `container`: chunk scanner, `fmt `/`data` decoder, WAV encoder
//! - `segment`: the immutable audio value type and its operations
//!
//! # Example
//! ```
//! use riffcut::AudioSegment;
//!
//! let a = AudioSegment::silent(1000, 8000, 1, 2).unwrap();
//! let b = AudioSegment::silent(500, 8000, 1, 2).unwrap();
//!
//! let joined = a.append_crossfade(&b, 100).unwrap();
//! assert_eq!(joined.duration_ms(), 1400);
//!
//! let tail = joined.slice(-250, joined.duration_ms() as i64).unwrap();
//! assert_eq!(tail.duration_ms(), 250);
//! ```

pub mod cli;
pub mod container;
pub mod error;
pub mod segment;

pub use container::{DecodedFormat, ExportFormat, InputFormat};
pub use error::{Result, RiffcutError};
pub use segment::{AudioSegment, FadeDirection, SegmentInfo};
