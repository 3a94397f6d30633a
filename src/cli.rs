//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `adprofile`.
#[derive(Debug, Parser)]
#[command(name = "adprofile", version, about = "Resolve the advertising profile for this install")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the advertising profile and print it.
    Resolve {
        /// Print the profile as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Log the advertising fields consumed by telemetry reporting.
    Report,
}
