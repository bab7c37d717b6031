//! Audio file I/O for Riffcut
//!
//! Thin byte-source and byte-sink wrappers around the container codec.
//! Whole files are read into memory before decoding; nothing streams.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info};

use super::buffer::AudioSegment;
use crate::container::{decode_wav, write_wav, ExportFormat, InputFormat};
use crate::error::{RiffcutError, Result};

impl AudioSegment {
    /// Decode a WAV container held in memory
    ///
    /// # Errors
    /// * Any container error from [`decode_wav`], or `UnsupportedBitDepth`
    pub fn from_bytes(data: &[u8]) -> Result<AudioSegment> {
        AudioSegment::try_from(decode_wav(data)?)
    }

    /// Read a whole WAV container from any byte source and decode it
    ///
    /// # Errors
    /// * `Io` - If reading fails
    /// * Any error from [`AudioSegment::from_bytes`]
    pub fn from_reader<R: Read>(mut reader: R) -> Result<AudioSegment> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        AudioSegment::from_bytes(&data)
    }

    /// Import an audio file
    ///
    /// # Arguments
    /// * `path` - Path to the audio file
    /// * `format` - Container format tag; only `"wav"` is supported
    ///
    /// # Errors
    /// * `UnsupportedInputFormat` - If `format` isn't a supported tag
    /// * `FileNotFound` - If the file does not exist
    /// * `Io` - If the file can't be read
    /// * Any decode error
    pub fn from_file(path: &Path, format: &str) -> Result<AudioSegment> {
        let input_format = format.parse::<InputFormat>()?;

        if !path.exists() {
            return Err(RiffcutError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }

        let data = fs::read(path)?;
        debug!("read {} bytes from {}", data.len(), path.display());
        let segment = match input_format {
            InputFormat::Wav => AudioSegment::from_bytes(&data)?,
        };
        info!(
            "imported {}: {} ch, {} Hz, {}-bit, {}ms",
            path.display(),
            segment.channels(),
            segment.frame_rate(),
            segment.sample_width() * 8,
            segment.duration_ms()
        );
        Ok(segment)
    }

    /// Encode into any byte sink
    ///
    /// # Errors
    /// * `UnsupportedOutputFormat` - If `format` isn't a supported tag
    /// * `DataTooLarge` / `Io` - From the encoder
    pub fn to_writer<W: Write>(&self, writer: &mut W, format: &str) -> Result<()> {
        match format.parse::<ExportFormat>()? {
            ExportFormat::Wav => write_wav(writer, self),
        }
    }

    /// Export to a file
    ///
    /// The format tag is validated before the file is created, so an
    /// unsupported format leaves nothing behind.
    ///
    /// # Errors
    /// * `UnsupportedOutputFormat` - If `format` isn't a supported tag
    /// * `Io` - If the file can't be created or written
    pub fn export(&self, path: &Path, format: &str) -> Result<()> {
        let export_format = format.parse::<ExportFormat>()?;

        let mut writer = BufWriter::new(File::create(path)?);
        match export_format {
            ExportFormat::Wav => write_wav(&mut writer, self)?,
        }
        writer.flush()?;

        info!(
            "exported {} ({}ms, {} bytes of PCM)",
            path.display(),
            self.duration_ms(),
            self.byte_len()
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
