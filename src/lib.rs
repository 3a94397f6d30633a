//! Core library entry for the `adprofile` crate and CLI.
//!
//! The heart of the crate is [`resolver::AdvertisingProfileResolver`], which
//! resolves one [`profile::AdvertisingProfile`] per resolver instance and
//! hands the same snapshot to every caller.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ports;
pub mod profile;
pub mod providers;
pub mod resolver;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    let settings = config::Settings::from_env();
    commands::dispatch(&cli.command, &settings)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["adprofile", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_subcommand() {
        let result = run(["adprofile"]);
        assert!(result.is_err());
    }
}
