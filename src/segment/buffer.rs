//! Audio Segment
//!
//! The core value type: interleaved PCM bytes plus channel, rate and width
//! metadata. Segments are immutable. Every operation yields a new segment
//! that owns a fresh copy of its bytes, so a derived segment never aliases
//! its parent's buffer.

use std::sync::Arc;

use log::warn;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::sample::SampleWidth;
use crate::container::DecodedFormat;
use crate::error::{RiffcutError, Result};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear amplitude to decibels
///
/// Returns `f64::NEG_INFINITY` for zero input.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

// ============================================================================
// Audio Segment
// ============================================================================

/// In-memory PCM audio with its format metadata
///
/// # Timing policy
/// Millisecond figures use real-valued arithmetic rounded half away from
/// zero (`f64::round`), which is round-half-up for the non-negative values
/// involved:
/// - `duration_ms = round(1000 * frame_count / frame_rate)`
/// - `frames_for_ms(ms) = round(ms * frame_rate / 1000)`
///
/// # Example
/// ```
/// use riffcut::AudioSegment;
///
/// // 1 second of 8kHz mono 16-bit silence
/// let seg = AudioSegment::new(vec![0u8; 16000], 1, 8000, 2).unwrap();
/// assert_eq!(seg.frame_count(), 8000);
/// assert_eq!(seg.duration_ms(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSegment {
    /// Interleaved PCM bytes, shared read-only between clones
    samples: Arc<[u8]>,
    channels: u16,
    frame_rate: u32,
    width: SampleWidth,
    frame_width: u16,
}

impl AudioSegment {
    /// Create a segment from raw interleaved PCM bytes
    ///
    /// # Arguments
    /// * `samples` - Interleaved little-endian PCM
    /// * `channels` - Channel count (>= 1)
    /// * `frame_rate` - Frames per second (> 0)
    /// * `sample_width` - Bytes per sample: 1, 2 or 4
    ///
    /// # Errors
    /// * `UnsupportedBitDepth` - If `sample_width` is 3 or otherwise unsupported
    /// * `InvalidFormat` - If `channels` or `frame_rate` is zero
    pub fn new(
        samples: impl Into<Arc<[u8]>>,
        channels: u16,
        frame_rate: u32,
        sample_width: u16,
    ) -> Result<Self> {
        let width = SampleWidth::from_bytes(sample_width)?;

        if channels == 0 {
            return Err(RiffcutError::InvalidFormat {
                reason: "channel count is 0".to_string(),
            });
        }
        if frame_rate == 0 {
            return Err(RiffcutError::InvalidFormat {
                reason: "frame rate is 0".to_string(),
            });
        }
        let frame_width = channels
            .checked_mul(sample_width)
            .ok_or_else(|| RiffcutError::InvalidFormat {
                reason: format!("{} channels x {} bytes overflows a frame", channels, sample_width),
            })?;

        let samples = samples.into();
        let partial = samples.len() % frame_width as usize;
        if partial != 0 {
            warn!(
                "{} trailing bytes don't form a whole {}-byte frame",
                partial, frame_width
            );
        }

        Ok(Self {
            samples,
            channels,
            frame_rate,
            width,
            frame_width,
        })
    }

    /// Build a segment sharing this one's metadata around new bytes
    pub(crate) fn spawn(&self, samples: Vec<u8>) -> Self {
        Self {
            samples: samples.into(),
            ..self.clone()
        }
    }

    /// Copy out the whole frames in `[start, end)`
    pub(crate) fn frames(&self, start: usize, end: usize) -> Self {
        let fw = self.frame_width as usize;
        self.spawn(self.samples[start * fw..end * fw].to_vec())
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    /// Number of interleaved channels
    #[inline]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames per second
    #[inline]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Bytes per single-channel sample
    #[inline]
    pub fn sample_width(&self) -> u16 {
        self.width.bytes() as u16
    }

    /// Sample codec for this segment's width
    #[inline]
    pub fn width(&self) -> SampleWidth {
        self.width
    }

    /// Bytes per frame (`channels * sample_width`)
    #[inline]
    pub fn frame_width(&self) -> u16 {
        self.frame_width
    }

    /// Raw interleaved PCM bytes
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.samples
    }

    /// Length of the PCM data in bytes
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the segment holds no PCM bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check that channel count, rate and width all match
    pub fn same_format(&self, other: &AudioSegment) -> bool {
        self.channels == other.channels
            && self.frame_rate == other.frame_rate
            && self.width == other.width
    }

    /// Fail with `IncompatibleFormat` unless `other` shares this format
    pub(crate) fn ensure_compatible(&self, other: &AudioSegment) -> Result<()> {
        if self.same_format(other) {
            return Ok(());
        }
        Err(RiffcutError::IncompatibleFormat {
            reason: format!(
                "{} ch / {} Hz / {}-byte vs {} ch / {} Hz / {}-byte",
                self.channels,
                self.frame_rate,
                self.sample_width(),
                other.channels,
                other.frame_rate,
                other.sample_width()
            ),
        })
    }

    // ------------------------------------------------------------------------
    // Timing
    // ------------------------------------------------------------------------

    /// Number of whole frames; a trailing partial frame is not counted
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.frame_width as usize
    }

    /// Duration in milliseconds, rounded to the nearest millisecond
    pub fn duration_ms(&self) -> u64 {
        (1000.0 * self.frame_count() as f64 / self.frame_rate as f64).round() as u64
    }

    /// Duration in seconds, unrounded
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.frame_rate as f64
    }

    /// Number of frames covering `ms` milliseconds, rounded to the nearest frame
    pub fn frames_for_ms(&self, ms: u64) -> usize {
        (ms as f64 * self.frame_rate as f64 / 1000.0).round() as usize
    }

    // ------------------------------------------------------------------------
    // Samples and levels
    // ------------------------------------------------------------------------

    /// Decode every whole-frame sample to a signed integer, interleaved
    pub fn samples_as_i32(&self) -> Vec<i32> {
        let end = self.frame_count() * self.frame_width as usize;
        self.samples[..end]
            .chunks_exact(self.width.bytes())
            .map(|s| self.width.read(s))
            .collect()
    }

    /// Root mean square of all samples, in sample units
    ///
    /// Returns 0.0 for an empty segment.
    pub fn rms(&self) -> f64 {
        let samples = self.samples_as_i32();
        if samples.is_empty() {
            return 0.0;
        }

        let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
        (sum_squares / samples.len() as f64).sqrt()
    }

    /// Largest absolute sample value
    pub fn max_amplitude(&self) -> u32 {
        self.samples_as_i32()
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Full-scale amplitude for this sample width
    #[inline]
    pub fn max_possible_amplitude(&self) -> f64 {
        -(self.width.min_value() as f64)
    }

    /// RMS level relative to full scale, in dB
    ///
    /// Returns `f64::NEG_INFINITY` for silence.
    pub fn dbfs(&self) -> f64 {
        linear_to_db(self.rms() / self.max_possible_amplitude())
    }

    /// Hex SHA-256 of the PCM bytes
    pub fn pcm_sha256(&self) -> String {
        format!("{:x}", Sha256::digest(&self.samples[..]))
    }

    /// Serializable summary of this segment
    pub fn info(&self) -> SegmentInfo {
        SegmentInfo {
            channels: self.channels,
            frame_rate: self.frame_rate,
            sample_width: self.sample_width(),
            frame_width: self.frame_width,
            frame_count: self.frame_count(),
            duration_ms: self.duration_ms(),
            byte_len: self.byte_len(),
            rms: self.rms(),
            max_amplitude: self.max_amplitude(),
            dbfs: self.dbfs(),
            pcm_sha256: self.pcm_sha256(),
        }
    }
}

impl TryFrom<DecodedFormat> for AudioSegment {
    type Error = RiffcutError;

    /// Take ownership of decoded PCM bytes
    fn try_from(format: DecodedFormat) -> Result<Self> {
        if format.bits_per_sample % 8 != 0 {
            return Err(RiffcutError::UnsupportedBitDepth(format.bits_per_sample));
        }
        let width = format.sample_width();
        AudioSegment::new(
            format.sample_bytes,
            format.channel_count,
            format.sample_rate,
            width,
        )
    }
}

/// Summary of a segment's format, timing and levels
#[derive(Debug, Clone, Serialize)]
pub struct SegmentInfo {
    pub channels: u16,
    pub frame_rate: u32,
    pub sample_width: u16,
    pub frame_width: u16,
    pub frame_count: usize,
    pub duration_ms: u64,
    pub byte_len: usize,
    pub rms: f64,
    pub max_amplitude: u32,
    /// RMS level in dBFS, `null` in JSON when the segment is silent
    #[serde(serialize_with = "serialize_db")]
    pub dbfs: f64,
    pub pcm_sha256: String,
}

fn serialize_db<S: serde::Serializer>(db: &f64, s: S) -> std::result::Result<S::Ok, S::Error> {
    if db.is_finite() {
        s.serialize_some(db)
    } else {
        s.serialize_none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mono16(samples: &[i16], rate: u32) -> AudioSegment {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        AudioSegment::new(bytes, 1, rate, 2).unwrap()
    }

    #[test]
    fn test_db_linear_roundtrip() {
        for db in [-60.0, -6.0, 0.0, 6.0] {
            assert_relative_eq!(linear_to_db(db_to_linear(db)), db, epsilon = 1e-9);
        }
        assert_eq!(linear_to_db(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_new_derives_frame_width() {
        let seg = AudioSegment::new(vec![0u8; 48], 2, 44100, 4).unwrap();
        assert_eq!(seg.frame_width(), 8);
        assert_eq!(seg.frame_count(), 6);
        assert_eq!(seg.sample_width(), 4);
    }

    #[test]
    fn test_new_rejects_bad_metadata() {
        assert!(matches!(
            AudioSegment::new(vec![0u8; 6], 1, 8000, 3).unwrap_err(),
            RiffcutError::UnsupportedBitDepth(24)
        ));
        assert!(matches!(
            AudioSegment::new(Vec::<u8>::new(), 0, 8000, 2).unwrap_err(),
            RiffcutError::InvalidFormat { .. }
        ));
        assert!(matches!(
            AudioSegment::new(Vec::<u8>::new(), 1, 0, 2).unwrap_err(),
            RiffcutError::InvalidFormat { .. }
        ));
        assert!(matches!(
            AudioSegment::new(Vec::<u8>::new(), u16::MAX, 8000, 4).unwrap_err(),
            RiffcutError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_frame_count_drops_partial_frame() {
        let seg = AudioSegment::new(vec![0u8; 11], 2, 8000, 2).unwrap();
        assert_eq!(seg.frame_count(), 2);
        assert!(seg.frame_count() * (seg.frame_width() as usize) <= seg.byte_len());
        assert_eq!(seg.samples_as_i32().len(), 4);
    }

    #[test]
    fn test_duration_rounds() {
        // 441 frames at 44.1kHz = 10ms exactly
        let seg = AudioSegment::new(vec![0u8; 882], 1, 44100, 2).unwrap();
        assert_eq!(seg.duration_ms(), 10);

        // 12 frames at 8kHz = 1.5ms, rounds up
        let seg = AudioSegment::new(vec![0u8; 12], 1, 8000, 1).unwrap();
        assert_eq!(seg.duration_ms(), 2);
        assert_relative_eq!(seg.duration_secs(), 0.0015);
    }

    #[test]
    fn test_frames_for_ms() {
        let seg = AudioSegment::new(Vec::<u8>::new(), 1, 44100, 2).unwrap();
        assert_eq!(seg.frames_for_ms(0), 0);
        assert_eq!(seg.frames_for_ms(1), 44);
        assert_eq!(seg.frames_for_ms(10), 441);
        assert_eq!(seg.frames_for_ms(1000), 44100);

        // Small ms values at sub-kHz rates don't truncate to zero
        let seg = AudioSegment::new(Vec::<u8>::new(), 1, 500, 2).unwrap();
        assert_eq!(seg.frames_for_ms(3), 2);
    }

    #[test]
    fn test_levels() {
        let seg = mono16(&[1000, -1000, 1000, -1000], 8000);
        assert_relative_eq!(seg.rms(), 1000.0);
        assert_eq!(seg.max_amplitude(), 1000);
        assert_relative_eq!(seg.max_possible_amplitude(), 32768.0);
        assert_relative_eq!(seg.dbfs(), 20.0 * (1000.0f64 / 32768.0).log10());

        let silent = mono16(&[0, 0], 8000);
        assert_eq!(silent.dbfs(), f64::NEG_INFINITY);
        assert_eq!(silent.max_amplitude(), 0);
    }

    #[test]
    fn test_info_serializes() {
        let info = mono16(&[0; 80], 8000).info();
        assert_eq!(info.duration_ms, 10);
        assert_eq!(info.pcm_sha256.len(), 64);

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["frame_count"], 80);
        assert!(json["dbfs"].is_null());
    }

    #[test]
    fn test_try_from_decoded() {
        let decoded = DecodedFormat {
            format_code: 1,
            channel_count: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_bytes: vec![0u8; 32],
        };
        let seg = AudioSegment::try_from(decoded).unwrap();
        assert_eq!(seg.frame_width(), 4);
        assert_eq!(seg.frame_count(), 8);

        let decoded = DecodedFormat {
            format_code: 1,
            channel_count: 1,
            sample_rate: 8000,
            bits_per_sample: 12,
            sample_bytes: vec![],
        };
        assert!(matches!(
            AudioSegment::try_from(decoded).unwrap_err(),
            RiffcutError::UnsupportedBitDepth(12)
        ));
    }

    #[test]
    fn test_clone_shares_but_spawn_copies() {
        let seg = mono16(&[1, 2, 3, 4], 8000);
        let clone = seg.clone();
        assert!(std::ptr::eq(seg.raw_data().as_ptr(), clone.raw_data().as_ptr()));

        let part = seg.frames(1, 3);
        assert_eq!(part.samples_as_i32(), vec![2, 3]);
        assert!(!std::ptr::eq(seg.raw_data().as_ptr(), part.raw_data().as_ptr()));
    }
}
