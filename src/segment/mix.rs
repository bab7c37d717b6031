//! Mixing Primitives
//!
//! Sample-level arithmetic over segments: linear fades, overlay and gain.
//! Every result saturates to the sample width's signed range.
//!
//! # Fade shape
//! Frame `i` of an `n`-frame fade gets gain `i / n` fading in and
//! `(n - i) / n` fading out. Paired in and out ramps sum to exactly 1.0 at
//! every frame, so crossfading a signal into itself leaves it unchanged.

use super::buffer::{db_to_linear, AudioSegment};
use super::sample::scale;
use crate::error::{RiffcutError, Result};

/// Direction of a linear gain ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Silence to full level
    In,
    /// Full level to silence
    Out,
}

impl FadeDirection {
    /// Gain applied to frame `index` of a `frames`-long ramp
    #[inline]
    pub fn gain(self, index: usize, frames: usize) -> f64 {
        let progress = index as f64 / frames as f64;
        match self {
            FadeDirection::In => progress,
            FadeDirection::Out => 1.0 - progress,
        }
    }
}

impl AudioSegment {
    /// Rewrite every whole-frame sample through `f(frame_index, sample)`
    ///
    /// Bytes of a trailing partial frame are carried over unchanged.
    fn map_samples<F>(&self, f: F) -> AudioSegment
    where
        F: Fn(usize, i32) -> i64,
    {
        let width = self.width();
        let fw = self.frame_width() as usize;
        let mut out = self.raw_data().to_vec();

        for (index, frame) in out.chunks_exact_mut(fw).enumerate() {
            for sample in frame.chunks_exact_mut(width.bytes()) {
                let value = f(index, width.read(sample));
                width.write(value, sample);
            }
        }

        self.spawn(out)
    }

    /// Apply a linear gain ramp across the whole segment
    pub fn fade(&self, direction: FadeDirection) -> AudioSegment {
        let frames = self.frame_count();
        self.map_samples(|index, sample| scale(sample, direction.gain(index, frames)))
    }

    /// Fade in over the first `ms` milliseconds, leaving the rest untouched
    ///
    /// # Errors
    /// * `SliceOutOfRange` - If `ms` exceeds the segment duration
    pub fn fade_in(&self, ms: u64) -> Result<AudioSegment> {
        let ms = self.fade_length(ms)?;
        let head = self.slice(0, ms)?.fade(FadeDirection::In);
        head.append(&self.slice(ms, self.duration_ms() as i64)?)
    }

    /// Fade out over the last `ms` milliseconds, leaving the rest untouched
    ///
    /// # Errors
    /// * `SliceOutOfRange` - If `ms` exceeds the segment duration
    pub fn fade_out(&self, ms: u64) -> Result<AudioSegment> {
        let duration = self.duration_ms() as i64;
        // Cut at a forward position; `-0` would select the whole segment
        let start = duration - self.fade_length(ms)?;
        let tail = self.slice(start, duration)?.fade(FadeDirection::Out);
        self.slice(0, start)?.append(&tail)
    }

    /// Validate a partial fade length against the duration
    fn fade_length(&self, ms: u64) -> Result<i64> {
        let duration = self.duration_ms();
        match i64::try_from(ms) {
            Ok(length) if ms <= duration => Ok(length),
            _ => Err(RiffcutError::SliceOutOfRange {
                start_ms: 0,
                end_ms: i64::try_from(ms).unwrap_or(i64::MAX),
                duration_ms: duration,
            }),
        }
    }

    /// Scale every sample by `db` decibels
    pub fn apply_gain(&self, db: f64) -> AudioSegment {
        let gain = db_to_linear(db);
        self.map_samples(|_, sample| scale(sample, gain))
    }

    /// Mix `other` into this segment sample by sample
    ///
    /// Both segments must share a format and cover the same number of frames.
    ///
    /// # Errors
    /// * `IncompatibleFormat` - If channel count, rate or width differ
    /// * `SegmentLengthMismatch` - If the frame counts differ
    pub fn overlay(&self, other: &AudioSegment) -> Result<AudioSegment> {
        self.ensure_compatible(other)?;
        if self.frame_count() != other.frame_count() {
            return Err(RiffcutError::SegmentLengthMismatch {
                left: self.frame_count(),
                right: other.frame_count(),
            });
        }

        let width = self.width();
        let len = self.frame_count() * self.frame_width() as usize;
        let mut out = self.raw_data()[..len].to_vec();

        for (sample, theirs) in out
            .chunks_exact_mut(width.bytes())
            .zip(other.raw_data()[..len].chunks_exact(width.bytes()))
        {
            let sum = width.read(sample) as i64 + width.read(theirs) as i64;
            width.write(sum, sample);
        }

        Ok(self.spawn(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn segment(values: &[i64], width: u16, channels: u16) -> AudioSegment {
        let mut bytes = vec![0u8; values.len() * width as usize];
        let sw = crate::segment::SampleWidth::from_bytes(width).unwrap();
        for (value, out) in values.iter().zip(bytes.chunks_exact_mut(width as usize)) {
            sw.write(*value, out);
        }
        AudioSegment::new(bytes, channels, 8000, width).unwrap()
    }

    #[test]
    fn test_fade_gain_shape() {
        assert_relative_eq!(FadeDirection::In.gain(0, 4), 0.0);
        assert_relative_eq!(FadeDirection::In.gain(2, 4), 0.5);
        assert_relative_eq!(FadeDirection::Out.gain(0, 4), 1.0);
        assert_relative_eq!(FadeDirection::Out.gain(3, 4), 0.25);
        for i in 0..4 {
            assert_relative_eq!(
                FadeDirection::In.gain(i, 4) + FadeDirection::Out.gain(i, 4),
                1.0
            );
        }
    }

    #[test]
    fn test_fade_in_ramps_up() {
        let seg = segment(&[1000; 4], 2, 1);
        assert_eq!(
            seg.fade(FadeDirection::In).samples_as_i32(),
            vec![0, 250, 500, 750]
        );
    }

    #[test]
    fn test_fade_out_ramps_down() {
        let seg = segment(&[-1000; 4], 2, 1);
        assert_eq!(
            seg.fade(FadeDirection::Out).samples_as_i32(),
            vec![-1000, -750, -500, -250]
        );
    }

    #[test]
    fn test_fade_is_per_frame_not_per_sample() {
        // Stereo: both channels of a frame get the same gain
        let seg = segment(&[1000, 2000, 1000, 2000], 2, 2);
        assert_eq!(
            seg.fade(FadeDirection::In).samples_as_i32(),
            vec![0, 0, 500, 1000]
        );
    }

    #[test]
    fn test_fade_8bit_keeps_offset() {
        let seg = segment(&[100, 100], 1, 1);
        let faded = seg.fade(FadeDirection::In);
        assert_eq!(faded.raw_data()[0], 128);
        assert_eq!(faded.samples_as_i32(), vec![0, 50]);
    }

    #[test]
    fn test_fade_keeps_length_and_format() {
        let seg = segment(&[5; 9], 4, 1);
        let faded = seg.fade(FadeDirection::Out);
        assert_eq!(faded.byte_len(), seg.byte_len());
        assert!(faded.same_format(&seg));
    }

    #[test]
    fn test_partial_fades() {
        let seg = segment(&[1000; 16], 2, 1); // 2ms at 8kHz
        let faded = seg.fade_in(1).unwrap().samples_as_i32();
        assert_eq!(faded[0], 0);
        assert!(faded[8..].iter().all(|&s| s == 1000));

        let faded = seg.fade_out(1).unwrap().samples_as_i32();
        assert!(faded[..8].iter().all(|&s| s == 1000));
        assert_eq!(faded[8], 1000);
        assert_eq!(faded[15], 125);

        assert!(matches!(
            seg.fade_in(3).unwrap_err(),
            RiffcutError::SliceOutOfRange { .. }
        ));
        assert!(matches!(
            seg.fade_out(3).unwrap_err(),
            RiffcutError::SliceOutOfRange { .. }
        ));
    }

    #[test]
    fn test_zero_length_fades_are_identity() {
        let seg = segment(&[1000; 80], 2, 1);
        assert_eq!(seg.fade_in(0).unwrap(), seg);
        assert_eq!(seg.fade_out(0).unwrap(), seg);
    }

    #[test]
    fn test_full_length_fades() {
        let seg = segment(&[1000; 8], 2, 1); // 1ms at 8kHz
        assert_eq!(seg.fade_in(1).unwrap(), seg.fade(FadeDirection::In));
        assert_eq!(seg.fade_out(1).unwrap(), seg.fade(FadeDirection::Out));
    }

    #[test]
    fn test_huge_fade_lengths_are_out_of_range() {
        let seg = segment(&[1000; 80], 2, 1);
        for ms in [u64::MAX, i64::MAX as u64 + 1] {
            match seg.fade_in(ms).unwrap_err() {
                RiffcutError::SliceOutOfRange { end_ms, duration_ms, .. } => {
                    assert_eq!((end_ms, duration_ms), (i64::MAX, 10));
                }
                other => panic!("Expected SliceOutOfRange, got: {:?}", other),
            }
            assert!(matches!(
                seg.fade_out(ms).unwrap_err(),
                RiffcutError::SliceOutOfRange { .. }
            ));
        }
    }

    #[test_case(1, 100, 100, 127 ; "8-bit clips high")]
    #[test_case(1, -100, -100, -128 ; "8-bit clips low")]
    #[test_case(2, 30000, 30000, 32767 ; "16-bit clips high")]
    #[test_case(2, -30000, -30000, -32768 ; "16-bit clips low")]
    #[test_case(4, 2_000_000_000, 2_000_000_000, 2_147_483_647 ; "32-bit clips high")]
    #[test_case(2, 1200, -200, 1000 ; "16-bit in range")]
    fn test_overlay_saturates(width: u16, a: i64, b: i64, expected: i32) {
        let mixed = segment(&[a], width, 1)
            .overlay(&segment(&[b], width, 1))
            .unwrap();
        assert_eq!(mixed.samples_as_i32(), vec![expected]);
    }

    #[test]
    fn test_overlay_length_mismatch() {
        let a = segment(&[0; 4], 2, 1);
        let b = segment(&[0; 5], 2, 1);
        match a.overlay(&b).unwrap_err() {
            RiffcutError::SegmentLengthMismatch { left, right } => {
                assert_eq!((left, right), (4, 5));
            }
            other => panic!("Expected SegmentLengthMismatch, got: {:?}", other),
        }
    }

    #[test]
    fn test_overlay_incompatible() {
        let mono = segment(&[0; 4], 2, 1);
        let stereo = segment(&[0; 4], 2, 2);
        assert!(matches!(
            mono.overlay(&stereo).unwrap_err(),
            RiffcutError::IncompatibleFormat { .. }
        ));
    }

    #[test]
    fn test_apply_gain() {
        let seg = segment(&[10000, -10000], 2, 1);
        let quieter = seg.apply_gain(-6.0).samples_as_i32();
        assert!((quieter[0] - 5012).abs() <= 1);
        assert!((quieter[1] + 5012).abs() <= 1);

        let louder = seg.apply_gain(24.0).samples_as_i32();
        assert_eq!(louder, vec![32767, -32768]);
    }
}
