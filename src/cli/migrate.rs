//! Handler for the `migrate` command group.

use serde_json::json;

use crate::cli::command::MigrateCommand;
use crate::cli::output;
use crate::config::Settings;
use crate::db::{self, Engine};
use crate::error::Result;

/// Execute a `migrate` subcommand.
pub fn execute(settings: &Settings, command: &MigrateCommand) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    match command {
        MigrateCommand::Run => run(&engine),
        MigrateCommand::Revert => revert(&engine),
        MigrateCommand::Status => status(&engine),
    }
}

fn run(engine: &Engine) -> Result<()> {
    output::action("Applying", "pending migrations");
    let applied = db::run_migrations(engine)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "migrate.run",
            "applied": applied,
        }));
        return Ok(());
    }

    if applied.is_empty() {
        output::success("Schema is up to date");
    } else {
        for version in &applied {
            output::field("applied", version);
        }
        output::success(&format!("Applied {} migration(s)", applied.len()));
    }
    Ok(())
}

fn revert(engine: &Engine) -> Result<()> {
    let version = db::revert_last_migration(engine)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "migrate.revert",
            "reverted": version,
        }));
        return Ok(());
    }

    output::success(&format!("Reverted migration {version}"));
    Ok(())
}

fn status(engine: &Engine) -> Result<()> {
    let applied = db::applied_migrations(engine)?;
    let pending = db::pending_migrations(engine)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "migrate.status",
            "applied": applied,
            "pending": pending,
        }));
        return Ok(());
    }

    output::section("Migrations");
    output::field("database", engine.url());
    for version in &applied {
        output::field("applied", version);
    }
    for name in &pending {
        output::field("pending", name);
    }

    if pending.is_empty() {
        output::success("Schema is up to date");
    } else {
        output::warning(&format!("{} pending migration(s)", pending.len()));
        output::hint(&format!(
            "run {} to apply",
            output::highlight("argdb migrate run")
        ));
    }
    Ok(())
}
