//! CLI Module
//!
//! Command-line interface over the segment operations.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Riffcut - slice, join and crossfade PCM WAV files
#[derive(Parser, Debug)]
#[command(name = "riffcut")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print format, timing and level information
    #[command(name = "info")]
    Info {
        /// Input WAV file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cut the range [start, end) out of a file
    #[command(name = "slice")]
    Slice {
        /// Input WAV file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Start in ms; negative counts from the end
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        start: i64,

        /// End in ms; negative counts from the end, default is the full length
        #[arg(long, allow_hyphen_values = true)]
        end: Option<i64>,

        /// Output format
        #[arg(short, long, default_value = "wav")]
        format: String,
    },

    /// Join files in order, optionally crossfading each seam
    #[command(name = "concat")]
    Concat {
        /// Output file
        output: PathBuf,

        /// Input WAV files
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Crossfade length in ms at each seam
        #[arg(short, long, default_value_t = 0)]
        crossfade: u64,

        /// Output format
        #[arg(short, long, default_value = "wav")]
        format: String,
    },

    /// Write a 16-bit mono sine tone
    #[command(name = "tone")]
    Tone {
        /// Output file
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value_t = 440.0)]
        freq: f64,

        /// Duration in ms
        #[arg(long, default_value_t = 1000)]
        duration: u64,

        /// Frame rate in Hz
        #[arg(long, default_value_t = 44100)]
        rate: u32,

        /// Output format
        #[arg(short, long, default_value = "wav")]
        format: String,
    },
}
