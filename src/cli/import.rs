//! Handler for the `import` command group.

use serde_json::json;

use crate::cli::command::{ArgsMeArgs, IbmArgs, ImportCommand};
use crate::cli::output;
use crate::config::Settings;
use crate::db;
use crate::error::Result;
use crate::ingest::{args_me, ibm, ImportSummary};

/// Execute an `import` subcommand.
pub fn execute(settings: &Settings, command: &ImportCommand) -> Result<()> {
    match command {
        ImportCommand::ArgsMe(args) => import_args_me(settings, args),
        ImportCommand::Ibm(args) => import_ibm(settings, args),
    }
}

fn import_args_me(settings: &Settings, args: &ArgsMeArgs) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    output::action("Reading", &args.file.display().to_string());
    let arguments = args_me::load(&args.file)?;

    output::action("Importing", &format!("{} arguments", arguments.len()));
    let summary = db::get_db_session(&engine, |session| {
        args_me::import(session, &arguments, args.batch_size)
    })?;
    report("import.args_me", &summary);
    Ok(())
}

fn import_ibm(settings: &Settings, args: &IbmArgs) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    output::action("Reading", &args.file.display().to_string());
    let records = ibm::load(&args.file)?;

    output::action("Importing", &format!("{} rows", records.len()));
    let summary = db::get_db_session(&engine, |session| ibm::import(session, &records))?;
    report("import.ibm", &summary);
    Ok(())
}

fn report(command: &str, summary: &ImportSummary) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "summary": summary,
        }));
        return;
    }

    output::field("domains", summary.domains);
    output::field("adus", summary.adus);
    output::field("relationships", summary.relationships);
    if summary.skipped > 0 {
        output::warning(&format!("{} item(s) skipped", summary.skipped));
    }
    output::success("Import complete");
}
