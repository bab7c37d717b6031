//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::segment::{generate_test_tone, AudioSegment};

/// Print information about a WAV file.
pub fn info(input: &Path, json: bool) -> Result<()> {
    let segment = AudioSegment::from_file(input, "wav")?;
    let info = segment.info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File:        {}", input.display());
    println!("Channels:    {}", info.channels);
    println!("Frame rate:  {} Hz", info.frame_rate);
    println!("Sample size: {}-bit", info.sample_width * 8);
    println!("Frames:      {}", info.frame_count);
    println!("Duration:    {} ms", info.duration_ms);
    println!("Peak:        {}", info.max_amplitude);
    println!("Level:       {:.2} dBFS", info.dbfs);
    println!("SHA-256:     {}", info.pcm_sha256);

    Ok(())
}

/// Cut `[start, end)` out of `input` into `output`.
pub fn slice(input: &Path, output: &Path, start: i64, end: Option<i64>, format: &str) -> Result<()> {
    let segment = AudioSegment::from_file(input, "wav")?;
    let end = end.unwrap_or(segment.duration_ms() as i64);
    info!("Slicing {} [{}ms, {}ms)", input.display(), start, end);

    let part = segment.slice(start, end)?;
    part.export(output, format)?;

    println!("Wrote {} ({} ms)", output.display(), part.duration_ms());
    Ok(())
}

/// Join `inputs` into `output`, crossfading each seam by `crossfade` ms.
pub fn concat(output: &Path, inputs: &[PathBuf], crossfade: u64, format: &str) -> Result<()> {
    info!(
        "Joining {} files with {}ms crossfade",
        inputs.len(),
        crossfade
    );

    let mut joined: Option<AudioSegment> = None;
    for input in inputs {
        let next = AudioSegment::from_file(input, "wav")?;
        joined = Some(match joined {
            Some(acc) => acc.append_crossfade(&next, crossfade)?,
            None => next,
        });
    }

    if let Some(joined) = joined {
        joined.export(output, format)?;
        println!("Wrote {} ({} ms)", output.display(), joined.duration_ms());
    }
    Ok(())
}

/// Write a sine tone to `output`.
pub fn tone(output: &Path, freq: f64, duration: u64, rate: u32, format: &str) -> Result<()> {
    info!("Generating {} Hz tone, {}ms at {} Hz", freq, duration, rate);

    let segment = generate_test_tone(freq, duration, rate)?;
    segment.export(output, format)?;

    println!("Wrote {} ({} ms)", output.display(), segment.duration_ms());
    Ok(())
}
