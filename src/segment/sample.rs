//! Sample Codec
//!
//! Converts between little-endian PCM bytes and signed integers. 8-bit PCM
//! is unsigned offset-binary on disk and handled in [-128, 127] internally.
//! All writes saturate to the representable range.

use num_traits::{Bounded, NumCast, ToPrimitive};
use serde::Serialize;

use crate::error::{RiffcutError, Result};

/// Width of one single-channel sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SampleWidth {
    /// 8-bit unsigned, silence at 128
    U8,
    /// 16-bit signed little-endian
    I16,
    /// 32-bit signed little-endian
    I32,
}

impl SampleWidth {
    /// Map a byte width to a supported sample width
    ///
    /// # Errors
    /// * `UnsupportedBitDepth` - For 3-byte (24-bit) and any other width
    pub fn from_bytes(width: u16) -> Result<Self> {
        match width {
            1 => Ok(SampleWidth::U8),
            2 => Ok(SampleWidth::I16),
            4 => Ok(SampleWidth::I32),
            other => Err(RiffcutError::UnsupportedBitDepth(other.saturating_mul(8))),
        }
    }

    /// Bytes per sample
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            SampleWidth::U8 => 1,
            SampleWidth::I16 => 2,
            SampleWidth::I32 => 4,
        }
    }

    /// Smallest signed value
    #[inline]
    pub fn min_value(self) -> i64 {
        match self {
            SampleWidth::U8 => i8::MIN as i64,
            SampleWidth::I16 => i16::MIN as i64,
            SampleWidth::I32 => i32::MIN as i64,
        }
    }

    /// Largest signed value
    #[inline]
    pub fn max_value(self) -> i64 {
        match self {
            SampleWidth::U8 => i8::MAX as i64,
            SampleWidth::I16 => i16::MAX as i64,
            SampleWidth::I32 => i32::MAX as i64,
        }
    }

    /// Byte pattern of one silent sample
    pub fn silence(self) -> &'static [u8] {
        match self {
            SampleWidth::U8 => &[0x80],
            SampleWidth::I16 => &[0, 0],
            SampleWidth::I32 => &[0, 0, 0, 0],
        }
    }

    /// Decode one sample. `bytes` must hold at least `self.bytes()` bytes.
    #[inline]
    pub fn read(self, bytes: &[u8]) -> i32 {
        match self {
            SampleWidth::U8 => bytes[0] as i32 - 128,
            SampleWidth::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
            SampleWidth::I32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        }
    }

    /// Encode one sample, clamping to the signed range of the width
    #[inline]
    pub fn write(self, value: i64, out: &mut [u8]) {
        match self {
            SampleWidth::U8 => {
                let signed: i8 = saturate(value);
                out[0] = (signed as i16 + 128) as u8;
            }
            SampleWidth::I16 => {
                let signed: i16 = saturate(value);
                out[..2].copy_from_slice(&signed.to_le_bytes());
            }
            SampleWidth::I32 => {
                let signed: i32 = saturate(value);
                out[..4].copy_from_slice(&signed.to_le_bytes());
            }
        }
    }
}

/// Clamp a wide intermediate into `T`'s range
#[inline]
fn saturate<T: Bounded + NumCast + ToPrimitive>(value: i64) -> T {
    let lo = T::min_value().to_i64().unwrap_or(i64::MIN);
    let hi = T::max_value().to_i64().unwrap_or(i64::MAX);
    num_traits::cast(value.clamp(lo, hi)).unwrap_or_else(T::max_value)
}

/// Scale a sample by a real gain, rounding to the nearest integer
#[inline]
pub fn scale(sample: i32, gain: f64) -> i64 {
    // f64 -> i64 casts saturate, so huge gains can't wrap
    (sample as f64 * gain).round() as i64
}
