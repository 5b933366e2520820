use clap::Parser;
use tracing::{debug, error};

use argdb::cli::{self, output, Cli};
use argdb::config::Settings;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::configure_output(&cli);

    let mut settings = match Settings::load(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };
    if let Some(level) = cli::log_level_override(&cli) {
        settings.logging.level = level.to_string();
    }
    settings.init_logging();
    debug!(config = %cli.config.display(), "argdb starting");

    if let Err(e) = cli::execute(&cli.command, &settings) {
        error!(error = %e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
