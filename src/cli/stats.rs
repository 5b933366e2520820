//! Handler for the `stats` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::Settings;
use crate::db;
use crate::error::Result;
use crate::store::{ArgumentStore, CorpusCounts};

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: i64,
}

fn count_rows(counts: &CorpusCounts) -> Vec<CountRow> {
    vec![
        CountRow {
            table: "domains",
            rows: counts.domains,
        },
        CountRow {
            table: "adus (claim)",
            rows: counts.claims,
        },
        CountRow {
            table: "adus (premise)",
            rows: counts.premises,
        },
        CountRow {
            table: "relationships",
            rows: counts.relationships,
        },
    ]
}

/// Execute `stats`.
pub fn execute(settings: &Settings) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let engine = db::get_engine(&settings.database)?;
    let counts = db::get_db_session(&engine, |session| session.counts())?;

    if output::is_json() {
        output::json_output(json!({
            "command": "stats",
            "counts": counts,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Corpus");
    output::lines(&Table::new(count_rows(&counts)).to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_count() {
        let counts = CorpusCounts {
            domains: 2,
            claims: 3,
            premises: 40,
            relationships: 39,
        };
        let table = Table::new(count_rows(&counts)).to_string();
        assert!(table.contains("Rows"));
        assert!(table.contains("adus (premise)"));
        assert!(table.contains("40"));
        assert!(table.contains("39"));
    }
}
