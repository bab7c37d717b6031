//! Error handling for Riffcut
//!
//! Every decode, construction and segment operation failure surfaces as a
//! typed, recoverable error. Nothing in the library panics on bad input.

use thiserror::Error;

/// Result type alias for Riffcut operations
pub type Result<T> = std::result::Result<T, RiffcutError>;

/// Main error type for Riffcut operations
#[derive(Error, Debug)]
pub enum RiffcutError {
    // Container Errors
    #[error("Not a RIFF/WAVE container")]
    NotRiffWave,

    #[error("Couldn't find fmt chunk in wav data")]
    MissingFormatChunk,

    #[error("fmt chunk too small: {declared_size} bytes (minimum 16)")]
    TruncatedFormatChunk { declared_size: u32 },

    #[error("Unknown audio format 0x{0:X} in wav data")]
    UnsupportedFormatCode(u16),

    #[error("Couldn't find data chunk in wav data")]
    MissingDataChunk,

    #[error(
        "data chunk at offset {offset} declares {declared_size} bytes but only {available} are present"
    )]
    TruncatedDataChunk {
        offset: usize,
        declared_size: u32,
        available: usize,
    },

    #[error("Unsupported bit depth: {0}-bit (only 8, 16 and 32 supported)")]
    UnsupportedBitDepth(u16),

    #[error("Invalid audio format: {reason}")]
    InvalidFormat { reason: String },

    // Segment Errors
    #[error("Slice [{start_ms}ms, {end_ms}ms) out of range for {duration_ms}ms segment")]
    SliceOutOfRange {
        start_ms: i64,
        end_ms: i64,
        duration_ms: u64,
    },

    #[error("Segment length mismatch: {left} frames vs {right} frames")]
    SegmentLengthMismatch { left: usize, right: usize },

    #[error("Incompatible segment formats: {reason}")]
    IncompatibleFormat { reason: String },

    #[error(
        "Crossfade is longer than the original AudioSegment ({crossfade_ms}ms > {duration_ms}ms)"
    )]
    CrossfadeExceedsSource { crossfade_ms: u64, duration_ms: u64 },

    #[error(
        "Crossfade is longer than the appended AudioSegment ({crossfade_ms}ms > {duration_ms}ms)"
    )]
    CrossfadeExceedsAppended { crossfade_ms: u64, duration_ms: u64 },

    // Format Selection Errors
    #[error("Unsupported input format: {format}")]
    UnsupportedInputFormat { format: String },

    #[error("Unsupported output format: {format}")]
    UnsupportedOutputFormat { format: String },

    #[error("Audio data too large for a WAV container: {len} bytes")]
    DataTooLarge { len: usize },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RiffcutError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            RiffcutError::NotRiffWave => "NOT_RIFF_WAVE",
            RiffcutError::MissingFormatChunk => "MISSING_FORMAT_CHUNK",
            RiffcutError::TruncatedFormatChunk { .. } => "TRUNCATED_FORMAT_CHUNK",
            RiffcutError::UnsupportedFormatCode(_) => "UNSUPPORTED_FORMAT_CODE",
            RiffcutError::MissingDataChunk => "MISSING_DATA_CHUNK",
            RiffcutError::TruncatedDataChunk { .. } => "TRUNCATED_DATA_CHUNK",
            RiffcutError::UnsupportedBitDepth(_) => "UNSUPPORTED_BIT_DEPTH",
            RiffcutError::InvalidFormat { .. } => "INVALID_FORMAT",
            RiffcutError::SliceOutOfRange { .. } => "SLICE_OUT_OF_RANGE",
            RiffcutError::SegmentLengthMismatch { .. } => "SEGMENT_LENGTH_MISMATCH",
            RiffcutError::IncompatibleFormat { .. } => "INCOMPATIBLE_FORMAT",
            RiffcutError::CrossfadeExceedsSource { .. } => "CROSSFADE_EXCEEDS_SOURCE",
            RiffcutError::CrossfadeExceedsAppended { .. } => "CROSSFADE_EXCEEDS_APPENDED",
            RiffcutError::UnsupportedInputFormat { .. } => "UNSUPPORTED_INPUT_FORMAT",
            RiffcutError::UnsupportedOutputFormat { .. } => "UNSUPPORTED_OUTPUT_FORMAT",
            RiffcutError::DataTooLarge { .. } => "DATA_TOO_LARGE",
            RiffcutError::FileNotFound { .. } => "FILE_NOT_FOUND",
            RiffcutError::Io(_) => "IO_ERROR",
            RiffcutError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the caller can reasonably retry with different arguments
    ///
    /// Decode failures describe the file itself and won't go away on retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RiffcutError::SliceOutOfRange { .. }
                | RiffcutError::SegmentLengthMismatch { .. }
                | RiffcutError::CrossfadeExceedsSource { .. }
                | RiffcutError::CrossfadeExceedsAppended { .. }
                | RiffcutError::UnsupportedInputFormat { .. }
                | RiffcutError::UnsupportedOutputFormat { .. }
                | RiffcutError::FileNotFound { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            RiffcutError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            RiffcutError::UnsupportedBitDepth(24) => vec![
                "24-bit audio is not widened automatically",
                "Convert the file to 16-bit or 32-bit PCM first",
            ],
            RiffcutError::UnsupportedFormatCode(_) => vec![
                "Only integer PCM WAV files are supported",
                "Re-export the file as uncompressed PCM",
            ],
            RiffcutError::TruncatedDataChunk { .. } => vec![
                "The file may be truncated - try re-exporting from source",
            ],
            RiffcutError::SliceOutOfRange { .. } => vec![
                "Check the slice bounds against the segment duration",
                "Negative positions count back from the end",
            ],
            RiffcutError::CrossfadeExceedsSource { .. }
            | RiffcutError::CrossfadeExceedsAppended { .. } => vec![
                "Use a crossfade shorter than both segments",
            ],
            RiffcutError::IncompatibleFormat { .. } => vec![
                "Both segments need the same channel count, frame rate and sample width",
            ],
            RiffcutError::UnsupportedInputFormat { .. }
            | RiffcutError::UnsupportedOutputFormat { .. } => vec!["Supported formats: wav"],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = RiffcutError::FileNotFound {
            path: "test.wav".to_string(),
            source: None,
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(
            RiffcutError::UnsupportedBitDepth(24).error_code(),
            "UNSUPPORTED_BIT_DEPTH"
        );
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = RiffcutError::CrossfadeExceedsSource {
            crossfade_ms: 500,
            duration_ms: 100,
        };
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.is_recoverable());
        assert!(!RiffcutError::MissingDataChunk.is_recoverable());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RiffcutError::UnsupportedFormatCode(0x3).to_string(),
            "Unknown audio format 0x3 in wav data"
        );
        let err = RiffcutError::CrossfadeExceedsAppended {
            crossfade_ms: 300,
            duration_ms: 200,
        };
        assert!(err.to_string().contains("(300ms > 200ms)"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: RiffcutError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
