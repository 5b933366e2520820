//! Handlers for the `claims` and `examples` commands.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::cli::command::SplitArgs;
use crate::cli::output;
use crate::config::Settings;
use crate::db;
use crate::error::Result;
use crate::model::Adu;
use crate::query::{QueryCache, TrainingExample};

const TEXT_WIDTH: usize = 60;

#[derive(Tabled)]
struct ClaimRow {
    #[tabled(rename = "Id")]
    id: i32,
    #[tabled(rename = "Domain")]
    domain_id: i32,
    #[tabled(rename = "Claim")]
    text: String,
}

#[derive(Tabled)]
struct ExampleRow {
    #[tabled(rename = "Claim")]
    claim: String,
    #[tabled(rename = "Premise")]
    premise: String,
    #[tabled(rename = "Stance")]
    category: String,
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= TEXT_WIDTH {
        return text.to_string();
    }
    let mut short: String = text.chars().take(TEXT_WIDTH - 1).collect();
    short.push('…');
    short
}

fn query_cache(settings: &Settings, args: &SplitArgs) -> QueryCache {
    if args.no_cache {
        QueryCache::disabled()
    } else {
        QueryCache::new(&settings.cache)
    }
}

fn limited<T>(mut rows: Vec<T>, limit: Option<usize>) -> (Vec<T>, usize) {
    let total = rows.len();
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    (rows, total)
}

/// Execute `claims <split>`.
pub fn claims(settings: &Settings, args: &SplitArgs) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    let cache = query_cache(settings, args);
    let claims = db::get_db_session(&engine, |session| cache.claims(session, args.split))?;
    let (claims, total): (Vec<Adu>, usize) = limited(claims, args.limit);

    if output::is_json() {
        output::json_output(json!({
            "command": "claims",
            "split": args.split,
            "total": total,
            "claims": claims,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("Claims ({})", args.split));
    let rows = claims.iter().map(|c| ClaimRow {
        id: c.id,
        domain_id: c.domain_id,
        text: truncate(&c.text),
    });
    output::lines(&Table::new(rows).to_string());
    output::note(&format!("showing {} of {total}", claims.len()));
    Ok(())
}

/// Execute `examples <split>`.
pub fn examples(settings: &Settings, args: &SplitArgs) -> Result<()> {
    let engine = db::get_engine(&settings.database)?;
    let cache = query_cache(settings, args);
    let examples = db::get_db_session(&engine, |session| cache.examples(session, args.split))?;
    let (examples, total): (Vec<TrainingExample>, usize) = limited(examples, args.limit);

    if output::is_json() {
        output::json_output(json!({
            "command": "examples",
            "split": args.split,
            "total": total,
            "examples": examples,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("Training examples ({})", args.split));
    let rows = examples.iter().map(|e| ExampleRow {
        claim: truncate(&e.claim.text),
        premise: truncate(&e.premise.text),
        category: e.category.to_string(),
    });
    output::lines(&Table::new(rows).to_string());
    output::note(&format!("showing {} of {total}", examples.len()));
    Ok(())
}
