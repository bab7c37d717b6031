//! Segment Operations
//!
//! Millisecond slicing with from-the-end indexing, concatenation, and
//! crossfaded appends. Each operation copies the bytes it keeps.

use log::debug;

use super::buffer::AudioSegment;
use super::mix::FadeDirection;
use crate::error::{RiffcutError, Result};

impl AudioSegment {
    /// Resolve a possibly negative millisecond position to a frame index
    ///
    /// Negative positions count back from `duration_ms()`. A position that
    /// resolves outside `[0, duration_ms()]` yields `None`. The end position
    /// maps to `frame_count()` so `[0, duration_ms())` always covers every
    /// whole frame.
    fn frame_at(&self, ms: i64) -> Option<usize> {
        let duration = self.duration_ms();
        let resolved = if ms < 0 {
            (duration as i64).checked_add(ms)?
        } else {
            ms
        };
        if resolved < 0 || resolved as u64 > duration {
            return None;
        }

        let resolved = resolved as u64;
        if resolved == duration {
            Some(self.frame_count())
        } else {
            Some(self.frames_for_ms(resolved).min(self.frame_count()))
        }
    }

    /// Copy out the half-open millisecond range `[start_ms, end_ms)`
    ///
    /// Negative endpoints count back from the end, so `slice(-250, d)` equals
    /// `slice(d - 250, d)` for a `d` ms segment.
    ///
    /// # Errors
    /// * `SliceOutOfRange` - If either endpoint resolves outside the segment
    ///   or the start lies after the end
    pub fn slice(&self, start_ms: i64, end_ms: i64) -> Result<AudioSegment> {
        let out_of_range = || RiffcutError::SliceOutOfRange {
            start_ms,
            end_ms,
            duration_ms: self.duration_ms(),
        };

        let start = self.frame_at(start_ms).ok_or_else(out_of_range)?;
        let end = self.frame_at(end_ms).ok_or_else(out_of_range)?;
        if start > end {
            return Err(out_of_range());
        }

        Ok(self.frames(start, end))
    }

    /// Append `other` with no crossfade
    ///
    /// Plain byte concatenation; the result's duration is the sum of both.
    ///
    /// # Errors
    /// * `IncompatibleFormat` - If channel count, rate or width differ
    pub fn append(&self, other: &AudioSegment) -> Result<AudioSegment> {
        self.append_crossfade(other, 0)
    }

    /// Append `other`, overlapping the last `crossfade_ms` of this segment
    /// with the first `crossfade_ms` of `other`
    ///
    /// The overlap fades this segment out while fading `other` in. The result
    /// is `duration_ms() + other.duration_ms() - crossfade_ms` long. The
    /// overlap is measured in whole frames (`frames_for_ms(crossfade_ms)`) on
    /// both sides, so the two faded parts always line up.
    ///
    /// # Errors
    /// * `IncompatibleFormat` - If channel count, rate or width differ
    /// * `CrossfadeExceedsSource` - If `crossfade_ms > self.duration_ms()`
    /// * `CrossfadeExceedsAppended` - If `crossfade_ms > other.duration_ms()`
    pub fn append_crossfade(&self, other: &AudioSegment, crossfade_ms: u64) -> Result<AudioSegment> {
        self.ensure_compatible(other)?;

        if crossfade_ms == 0 {
            let mut data = Vec::with_capacity(self.byte_len() + other.byte_len());
            data.extend_from_slice(self.raw_data());
            data.extend_from_slice(other.raw_data());
            return Ok(self.spawn(data));
        }

        if crossfade_ms > self.duration_ms() {
            return Err(RiffcutError::CrossfadeExceedsSource {
                crossfade_ms,
                duration_ms: self.duration_ms(),
            });
        }
        if crossfade_ms > other.duration_ms() {
            return Err(RiffcutError::CrossfadeExceedsAppended {
                crossfade_ms,
                duration_ms: other.duration_ms(),
            });
        }

        let overlap = self
            .frames_for_ms(crossfade_ms)
            .min(self.frame_count())
            .min(other.frame_count());
        let split = self.frame_count() - overlap;
        debug!(
            "crossfading {}ms ({} frames) at frame {}",
            crossfade_ms, overlap, split
        );

        let tail = self.frames(split, self.frame_count()).fade(FadeDirection::Out);
        let head = other.frames(0, overlap).fade(FadeDirection::In);
        let mixed = tail.overlay(&head)?;

        let fw = self.frame_width() as usize;
        let rest = &other.raw_data()[overlap * fw..];
        let mut data = Vec::with_capacity(split * fw + mixed.byte_len() + rest.len());
        data.extend_from_slice(&self.raw_data()[..split * fw]);
        data.extend_from_slice(mixed.raw_data());
        data.extend_from_slice(rest);

        Ok(self.spawn(data))
    }
}

/// Concatenate segments in order with no crossfade
///
/// Returns `None` for an empty input.
///
/// # Errors
/// * `IncompatibleFormat` - If any segment's format differs from the first
pub fn concat<'a, I>(segments: I) -> Result<Option<AudioSegment>>
where
    I: IntoIterator<Item = &'a AudioSegment>,
{
    let mut iter = segments.into_iter();
    let first = match iter.next() {
        Some(first) => first,
        None => return Ok(None),
    };

    let mut data = first.raw_data().to_vec();
    for seg in iter {
        first.ensure_compatible(seg)?;
        data.extend_from_slice(seg.raw_data());
    }

    Ok(Some(first.spawn(data)))
}
