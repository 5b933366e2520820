//! Command-line interface definitions.
//!
//! Defines the `argdb` CLI using `clap`: schema migrations, connectivity
//! checks, corpus statistics, split queries and dataset imports.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ingest::DEFAULT_BATCH_SIZE;
use crate::query::Split;

/// Argument-mining corpus database tool
#[derive(Parser, Debug)]
#[command(name = "argdb")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "argdb.toml")]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the database schema
    #[command(subcommand)]
    Migrate(MigrateCommand),

    /// Inspect or clear the local query cache
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Verify that the database is reachable
    Check,

    /// Show row counts per table
    Stats,

    /// List the claims of a split
    Claims(SplitArgs),

    /// List the training examples of a split
    Examples(SplitArgs),

    /// Import a public dataset
    #[command(subcommand)]
    Import(ImportCommand),
}

/// Subcommands for `argdb migrate`
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Run,
    /// Revert the most recent migration
    Revert,
    /// List applied and pending migrations
    Status,
}

/// Subcommands for `argdb cache`
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CacheCommand {
    /// Show the cache directory and its files
    Status,
    /// Delete the cache files
    Clear,
}

/// Subcommands for `argdb import`
#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// Import the args.me corpus (JSON)
    ArgsMe(ArgsMeArgs),
    /// Import the IBM claim-stance dataset (CSV)
    Ibm(IbmArgs),
}

/// Arguments for `claims` and `examples`.
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Split to query: training, test or benchmark
    pub split: Split,

    /// Show at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,

    /// Query the database even if a fresh cache exists
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for `import args-me`.
#[derive(Parser, Debug)]
pub struct ArgsMeArgs {
    /// Path to args-me JSON file
    pub file: PathBuf,

    /// Rows per committed batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

/// Arguments for `import ibm`.
#[derive(Parser, Debug)]
pub struct IbmArgs {
    /// Path to claim_stance_dataset_v1.csv
    pub file: PathBuf,
}
