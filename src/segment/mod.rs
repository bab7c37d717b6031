//! Audio Segment Module
//!
//! The in-memory audio model and everything derived from it:
//! - `AudioSegment` value type and timing metrics
//! - Sample codec with saturating writes
//! - Slicing, appending and crossfading
//! - Fades, overlay and gain
//! - File-level import/export

pub mod buffer;
pub mod generate;
pub mod io;
pub mod mix;
pub mod ops;
pub mod sample;

pub use buffer::{db_to_linear, linear_to_db, AudioSegment, SegmentInfo};
pub use generate::generate_test_tone;
pub use mix::FadeDirection;
pub use ops::concat;
pub use sample::SampleWidth;
