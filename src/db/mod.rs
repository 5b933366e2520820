//! Database access: engine and sessions, schema, rows and migrations.
//!
//! ```no_run
//! use argdb::config::DatabaseSettings;
//! use argdb::db;
//!
//! # fn main() -> argdb::error::Result<()> {
//! let engine = db::get_engine(&DatabaseSettings::for_url("argdb.db"))?;
//! db::run_migrations(&engine)?;
//! let adus = db::get_db_session(&engine, |session| session.adus())?;
//! println!("{} ADUs", adus.len());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod connection;
pub mod row;
pub mod schema;
pub mod session;
mod store;

pub use backend::{Backend, DbConnection, MIGRATIONS};
pub use connection::{
    applied_migrations, get_db_session, get_engine, get_session, pending_migrations,
    revert_last_migration, run_migrations, shared_engine, DbPool, Engine,
};
pub use session::Session;
