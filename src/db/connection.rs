//! Database connection management using Diesel ORM.
//!
//! Provides the [`Engine`] (connection pool), session construction, and
//! migration support.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel_migrations::MigrationHarness;
use tracing::{debug, info};

use super::backend::{self, DbConnection, MIGRATIONS};
use super::session::Session;
use crate::config::{mask_url, DatabaseSettings};
use crate::error::{Error, Result};

/// Type alias for a connection pool over the compiled backend.
pub type DbPool = Pool<ConnectionManager<DbConnection>>;

/// Applies per-connection settings whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionSetup;

impl CustomizeConnection<DbConnection, diesel::r2d2::Error> for ConnectionSetup {
    fn on_acquire(&self, conn: &mut DbConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        backend::configure(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Connection factory for the argument-mining database.
///
/// Cheap to clone; clones share the same pool.
#[derive(Clone)]
pub struct Engine {
    pool: DbPool,
    display_url: String,
}

impl Engine {
    /// Check a connection out of the pool.
    ///
    /// # Errors
    /// Returns [`Error::Connection`] if no connection can be obtained within
    /// the configured timeout.
    pub fn session(&self) -> Result<Session> {
        let conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(Session::new(conn))
    }

    /// Connection URL with the password masked.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.display_url
    }

    /// Name of the compiled backend (`sqlite` or `mysql`).
    #[must_use]
    pub fn backend(&self) -> &'static str {
        backend::NAME
    }

    /// Underlying pool.
    #[must_use]
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("Engine")
            .field("backend", &backend::NAME)
            .field("url", &self.display_url)
            .field("connections", &state.connections)
            .field("idle", &state.idle_connections)
            .finish()
    }
}

/// Build an engine from connection settings.
///
/// Connections are opened lazily on first checkout, except for in-memory
/// SQLite databases, which are pinned to a single long-lived connection.
///
/// # Errors
/// Returns a configuration error when no connection URL can be resolved or
/// the URL does not match the compiled backend.
pub fn get_engine(settings: &DatabaseSettings) -> Result<Engine> {
    settings.validate()?;
    let resolved = settings.resolve_url()?;
    let url = backend::normalize_url(&resolved)?;
    let display_url = mask_url(&resolved);

    let builder = Pool::builder()
        .connection_timeout(Duration::from_secs(settings.connect_timeout_secs))
        .test_on_check_out(settings.pre_ping)
        .connection_customizer(Box::new(ConnectionSetup));

    let builder = if backend::is_in_memory(&url) {
        builder
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        builder.max_size(settings.pool_size).min_idle(Some(0))
    };

    let pool = builder
        .build(ConnectionManager::<DbConnection>::new(url))
        .map_err(|e| Error::Connection(e.to_string()))?;

    info!(
        backend = backend::NAME,
        url = %display_url,
        pool_size = pool.max_size(),
        "database engine created"
    );

    Ok(Engine { pool, display_url })
}

static SHARED_ENGINE: OnceLock<Engine> = OnceLock::new();

/// Process-wide engine, created from `settings` on first use.
///
/// Later calls return the engine created by the first successful call and
/// ignore their `settings`.
///
/// # Errors
/// Returns the [`get_engine`] error if the engine has not been created yet
/// and cannot be built.
pub fn shared_engine(settings: &DatabaseSettings) -> Result<&'static Engine> {
    if let Some(engine) = SHARED_ENGINE.get() {
        return Ok(engine);
    }
    let engine = get_engine(settings)?;
    Ok(SHARED_ENGINE.get_or_init(|| engine))
}

/// Obtain a session bound to `engine`.
///
/// The caller owns the session; it is returned to the pool when dropped or
/// closed.
///
/// # Errors
/// Returns [`Error::Connection`] if the pool cannot hand out a connection.
pub fn get_session(engine: &Engine) -> Result<Session> {
    engine.session()
}

/// Run `f` with a fresh session and release the session afterwards.
///
/// The session is released whether `f` succeeds or fails.
///
/// # Errors
/// Returns the checkout error or whatever `f` returns.
pub fn get_db_session<T, F>(engine: &Engine, f: F) -> Result<T>
where
    F: FnOnce(&mut Session) -> Result<T>,
{
    let mut session = engine.session()?;
    let result = f(&mut session);
    session.close();
    result
}

/// Run all pending database migrations. Returns the applied versions.
///
/// # Errors
/// Returns [`Error::Migration`] if a migration fails.
pub fn run_migrations(engine: &Engine) -> Result<Vec<String>> {
    let mut session = engine.session()?;
    let applied = session
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    if applied.is_empty() {
        debug!("database schema is up to date");
    } else {
        info!(count = applied.len(), versions = ?applied, "applied migrations");
    }
    Ok(applied)
}

/// Revert the most recently applied migration. Returns its version.
///
/// # Errors
/// Returns [`Error::Migration`] if nothing is applied or the revert fails.
pub fn revert_last_migration(engine: &Engine) -> Result<String> {
    let mut session = engine.session()?;
    let version = session
        .connection()
        .revert_last_migration(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?
        .to_string();
    info!(version = %version, "reverted migration");
    Ok(version)
}

/// Names of the embedded migrations not yet applied.
///
/// # Errors
/// Returns [`Error::Migration`] if the migration table cannot be read.
pub fn pending_migrations(engine: &Engine) -> Result<Vec<String>> {
    let mut session = engine.session()?;
    let pending = session
        .connection()
        .pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;
    Ok(pending.iter().map(|m| m.name().to_string()).collect())
}

/// Versions of the migrations already applied to the database.
///
/// # Errors
/// Returns [`Error::Migration`] if the migration table cannot be read.
pub fn applied_migrations(engine: &Engine) -> Result<Vec<String>> {
    let mut session = engine.session()?;
    let applied = session
        .connection()
        .applied_migrations()
        .map_err(|e| Error::Migration(e.to_string()))?;
    Ok(applied.iter().map(ToString::to_string).collect())
}

#[cfg(all(test, not(feature = "mysql")))]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use diesel::prelude::*;

    fn memory_engine() -> Engine {
        get_engine(&DatabaseSettings::for_url(":memory:")).unwrap()
    }

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[test]
    fn get_engine_with_memory_db() {
        let engine = memory_engine();
        assert_eq!(engine.backend(), "sqlite");
        assert_eq!(engine.pool().max_size(), 1);
        assert!(engine.session().is_ok());
    }

    #[test]
    fn get_engine_without_credentials_fails() {
        let result = get_engine(&DatabaseSettings::default());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "database.user"
            }))
        ));
    }

    #[test]
    fn get_engine_rejects_foreign_scheme() {
        let result = get_engine(&DatabaseSettings::for_url("postgres://localhost/argdb"));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn run_migrations_creates_tables() {
        let engine = memory_engine();
        let applied = run_migrations(&engine).unwrap();
        assert!(!applied.is_empty());

        let mut session = engine.session().unwrap();
        let query = "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name";
        let names: Vec<String> = diesel::sql_query(query)
            .load::<TableName>(session.connection())
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .filter(|name| !name.starts_with("sqlite_") && !name.starts_with("__diesel"))
            .collect();

        assert_eq!(names, vec!["adus", "domains", "relationships"]);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let engine = memory_engine();
        run_migrations(&engine).unwrap();
        assert!(run_migrations(&engine).unwrap().is_empty());
        assert!(pending_migrations(&engine).unwrap().is_empty());
    }

    #[test]
    fn revert_then_pending() {
        let engine = memory_engine();
        run_migrations(&engine).unwrap();
        let applied = applied_migrations(&engine).unwrap();
        assert_eq!(applied.len(), 1);

        let reverted = revert_last_migration(&engine).unwrap();
        assert_eq!(reverted, applied[0]);
        assert_eq!(pending_migrations(&engine).unwrap().len(), 1);
    }

    #[test]
    fn get_db_session_passes_errors_through() {
        let engine = memory_engine();
        let result: Result<()> =
            get_db_session(&engine, |_| Err(Error::InvalidArgument("boom".to_string())));
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        // The connection went back to the pool.
        assert!(engine.session().is_ok());
    }

    #[test]
    fn shared_engine_is_reused() {
        let first = shared_engine(&DatabaseSettings::for_url(":memory:")).unwrap();
        let second = shared_engine(&DatabaseSettings::default()).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
