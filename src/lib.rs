//! argdb - Database access for the argument-mining corpus.
//!
//! This crate stores argumentative discourse units (claims and premises),
//! their topic domains and the stance relationships between them, and
//! provides the connection handling, queries and importers built on top.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with environment overrides
//! - [`db`] - Engine (connection pool), sessions, schema and migrations
//! - [`model`] - Domain, ADU and relationship types
//! - [`store`] - Storage trait implemented by sessions and an in-memory store
//! - [`query`] - Training/test/benchmark splits, training examples and cache
//! - [`ingest`] - Importers for the args.me and IBM claim-stance datasets
//! - [`cli`] - The `argdb` command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `sqlite` (default) - Local SQLite database, bundled
//! - `mysql` - MySQL server backend; takes precedence when both are enabled
//!
//! # Example
//!
//! ```no_run
//! use argdb::config::Settings;
//! use argdb::db;
//! use argdb::query::{QueryCache, Split};
//!
//! # fn main() -> argdb::error::Result<()> {
//! let settings = Settings::load("argdb.toml")?;
//! let engine = db::get_engine(&settings.database)?;
//! let cache = QueryCache::new(&settings.cache);
//! let training = db::get_db_session(&engine, |session| cache.examples(session, Split::Training))?;
//! println!("{} training examples", training.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod model;
pub mod query;
pub mod store;
