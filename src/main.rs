//! Riffcut CLI
//!
//! Command-line interface for slicing and joining PCM WAV files.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::debug;

use riffcut::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Riffcut v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Riffcut v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Info { input, json } => commands::info(&input, json)
            .with_context(|| format!("reading {}", input.display())),
        Commands::Slice {
            input,
            output,
            start,
            end,
            format,
        } => commands::slice(&input, &output, start, end, &format)
            .with_context(|| format!("slicing {}", input.display())),
        Commands::Concat {
            output,
            inputs,
            crossfade,
            format,
        } => commands::concat(&output, &inputs, crossfade, &format)
            .with_context(|| format!("writing {}", output.display())),
        Commands::Tone {
            output,
            freq,
            duration,
            rate,
            format,
        } => commands::tone(&output, freq, duration, rate, &format)
            .with_context(|| format!("writing {}", output.display())),
    }
}
