//! Segment generators
//!
//! Synthetic segments for tests and the CLI: digital silence and sine tones.

use super::buffer::AudioSegment;
use super::sample::SampleWidth;
use crate::error::Result;

impl AudioSegment {
    /// Create `duration_ms` of digital silence
    ///
    /// Silence is 0 for signed widths and 128 for 8-bit.
    ///
    /// # Errors
    /// * `UnsupportedBitDepth` / `InvalidFormat` - As for [`AudioSegment::new`]
    pub fn silent(
        duration_ms: u64,
        frame_rate: u32,
        channels: u16,
        sample_width: u16,
    ) -> Result<AudioSegment> {
        let width = SampleWidth::from_bytes(sample_width)?;
        let frames = (duration_ms as f64 * frame_rate as f64 / 1000.0).round() as usize;
        let bytes = width.silence().repeat(frames * channels as usize);
        AudioSegment::new(bytes, channels, frame_rate, sample_width)
    }
}

/// Generate a 16-bit mono sine tone at half of full scale
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration_ms` - Length of the tone in milliseconds
/// * `frame_rate` - Frames per second
///
/// # Errors
/// * `InvalidFormat` - If `frame_rate` is zero
pub fn generate_test_tone(frequency: f64, duration_ms: u64, frame_rate: u32) -> Result<AudioSegment> {
    let frames = (duration_ms as f64 * frame_rate as f64 / 1000.0).round() as usize;
    let angular_freq = 2.0 * std::f64::consts::PI * frequency / frame_rate.max(1) as f64;
    let amplitude = i16::MAX as f64 / 2.0;

    let bytes: Vec<u8> = (0..frames)
        .flat_map(|i| (((angular_freq * i as f64).sin() * amplitude).round() as i16).to_le_bytes())
        .collect();

    AudioSegment::new(bytes, 1, frame_rate, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent() {
        let seg = AudioSegment::silent(250, 8000, 2, 2).unwrap();
        assert_eq!(seg.frame_count(), 2000);
        assert_eq!(seg.duration_ms(), 250);
        assert!(seg.raw_data().iter().all(|&b| b == 0));
        assert_eq!(seg.rms(), 0.0);
    }

    #[test]
    fn test_silent_8bit() {
        let seg = AudioSegment::silent(10, 8000, 1, 1).unwrap();
        assert!(seg.raw_data().iter().all(|&b| b == 128));
        assert_eq!(seg.max_amplitude(), 0);
    }

    #[test]
    fn test_silent_rejects_24bit() {
        assert!(AudioSegment::silent(10, 8000, 1, 3).is_err());
    }

    #[test]
    fn test_generate_test_tone() {
        let seg = generate_test_tone(440.0, 1000, 48000).unwrap();
        assert_eq!(seg.frame_count(), 48000);
        assert_eq!(seg.channels(), 1);
        assert_eq!(seg.sample_width(), 2);

        // Half scale sine: peak near 16383, RMS near peak / sqrt(2)
        assert!((seg.max_amplitude() as i64 - 16383).abs() <= 2);
        assert!((seg.rms() - 16383.0 / 2f64.sqrt()).abs() < 50.0);
    }

    #[test]
    fn test_generate_test_tone_zero_rate() {
        assert!(generate_test_tone(440.0, 100, 0).is_err());
    }
}
