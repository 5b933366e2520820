//! Handler for the `cache` command group.

use serde_json::json;

use crate::cli::command::CacheCommand;
use crate::cli::output;
use crate::config::Settings;
use crate::error::Result;
use crate::query::QueryCache;

/// Execute a `cache` subcommand.
pub fn execute(settings: &Settings, command: &CacheCommand) -> Result<()> {
    let cache = QueryCache::new(&settings.cache);
    match command {
        CacheCommand::Status => status(&cache),
        CacheCommand::Clear => clear(&cache),
    }
}

fn status(cache: &QueryCache) -> Result<()> {
    let files: Vec<String> = cache
        .existing_files()
        .iter()
        .map(|f| f.display().to_string())
        .collect();

    if output::is_json() {
        output::json_output(json!({
            "command": "cache.status",
            "enabled": cache.is_enabled(),
            "dir": cache.dir().display().to_string(),
            "files": files,
        }));
        return Ok(());
    }

    output::section("Query cache");
    output::field("enabled", cache.is_enabled());
    output::field("dir", cache.dir().display());
    if files.is_empty() {
        output::note("no cache files");
    }
    for file in &files {
        output::field("file", file);
    }
    Ok(())
}

fn clear(cache: &QueryCache) -> Result<()> {
    let removed = cache.clear()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "cache.clear",
            "removed": removed,
        }));
        return Ok(());
    }

    output::success(&format!("Removed {removed} cache file(s)"));
    if !cache.is_enabled() {
        output::hint("the cache is disabled in the configuration");
    }
    Ok(())
}
