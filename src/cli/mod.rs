//! CLI module graph and command dispatch.

pub mod cache;
pub mod check;
pub mod command;
pub mod import;
pub mod migrate;
pub mod output;
pub mod query;
pub mod stats;

pub use command::{Cli, ColorChoice, Commands};

use crate::config::Settings;
use crate::error::Result;

/// Apply the global output flags.
pub fn configure_output(cli: &Cli) {
    match cli.color {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));
}

/// Log level implied by `-v`/`--quiet`, if it should override the config.
#[must_use]
pub fn log_level_override(cli: &Cli) -> Option<&'static str> {
    match cli.verbose {
        0 if cli.quiet => Some("error"),
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Run the selected command.
///
/// # Errors
/// Returns whatever the command handler fails with.
pub fn execute(command: &Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Migrate(cmd) => migrate::execute(settings, cmd),
        Commands::Cache(cmd) => cache::execute(settings, cmd),
        Commands::Check => check::execute(settings),
        Commands::Stats => stats::execute(settings),
        Commands::Claims(args) => query::claims(settings, args),
        Commands::Examples(args) => query::examples(settings, args),
        Commands::Import(cmd) => import::execute(settings, cmd),
    }
}
