//! Handler for the `check` command: connectivity and schema state.

use serde_json::json;

use crate::cli::output;
use crate::config::Settings;
use crate::db;
use crate::error::Result;

/// Execute `check`.
pub fn execute(settings: &Settings) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    output::action("Connecting to", engine.url());
    db::get_db_session(&engine, |session| session.ping())?;
    let pending = db::pending_migrations(&engine)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "backend": engine.backend(),
            "url": engine.url(),
            "connected": true,
            "pending_migrations": pending.len(),
        }));
        return Ok(());
    }

    output::field("backend", engine.backend());
    output::field("database", engine.url());
    output::success("Connection ok");
    if !pending.is_empty() {
        output::warning(&format!("{} pending migration(s)", pending.len()));
        output::hint(&format!(
            "run {} to apply",
            output::highlight("argdb migrate run")
        ));
    }
    Ok(())
}
