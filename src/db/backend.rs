//! Compile-time selection of the database backend.
//!
//! The shared research server runs MySQL (`mysql` feature). Local work and
//! the test suite use a bundled SQLite (`sqlite` feature, default). When both
//! features are enabled MySQL wins.

use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

use crate::error::{ConfigError, Result};

#[cfg(not(any(feature = "sqlite", feature = "mysql")))]
compile_error!("argdb needs either the `sqlite` or the `mysql` feature");

#[cfg(feature = "mysql")]
mod imp {
    use super::*;

    /// Diesel connection type of the compiled backend.
    pub type DbConnection = diesel::MysqlConnection;
    /// Diesel backend type of the compiled backend.
    pub type Backend = diesel::mysql::Mysql;

    pub const NAME: &str = "mysql";

    /// Embedded database migrations compiled from `migrations/mysql`.
    pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/mysql");

    pub(crate) const LAST_INSERT_ID_SQL: &str = "CAST(LAST_INSERT_ID() AS SIGNED)";

    pub(crate) fn normalize_url(url: &str) -> Result<String> {
        if url.starts_with("mysql://") {
            Ok(url.to_string())
        } else {
            Err(ConfigError::InvalidValue {
                field: "database.url",
                reason: "expected a mysql:// URL".to_string(),
            }
            .into())
        }
    }

    pub(crate) fn is_in_memory(_url: &str) -> bool {
        false
    }

    pub(crate) fn configure(conn: &mut DbConnection) -> QueryResult<()> {
        diesel::sql_query("SET NAMES utf8mb4").execute(conn)?;
        Ok(())
    }
}

#[cfg(all(feature = "sqlite", not(feature = "mysql")))]
mod imp {
    use super::*;

    /// Diesel connection type of the compiled backend.
    pub type DbConnection = diesel::SqliteConnection;
    /// Diesel backend type of the compiled backend.
    pub type Backend = diesel::sqlite::Sqlite;

    pub const NAME: &str = "sqlite";

    /// Embedded database migrations compiled from `migrations/sqlite`.
    pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/sqlite");

    pub(crate) const LAST_INSERT_ID_SQL: &str = "last_insert_rowid()";

    pub(crate) fn normalize_url(url: &str) -> Result<String> {
        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(path.to_string());
        }
        if url.contains("://") {
            return Err(ConfigError::InvalidValue {
                field: "database.url",
                reason: format!(
                    "this build only supports SQLite; rebuild with the `mysql` feature for {}",
                    url.split("://").next().unwrap_or_default()
                ),
            }
            .into());
        }
        Ok(url.to_string())
    }

    pub(crate) fn is_in_memory(url: &str) -> bool {
        url == ":memory:" || url.contains("mode=memory")
    }

    pub(crate) fn configure(conn: &mut DbConnection) -> QueryResult<()> {
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
        diesel::sql_query("PRAGMA busy_timeout = 5000").execute(conn)?;
        Ok(())
    }
}

pub use imp::{Backend, DbConnection, MIGRATIONS, NAME};
pub(crate) use imp::{configure, is_in_memory, normalize_url, LAST_INSERT_ID_SQL};

#[cfg(all(test, not(feature = "mysql")))]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn sqlite_scheme_is_stripped() {
        assert_eq!(normalize_url("sqlite:///tmp/a.db").unwrap(), "/tmp/a.db");
        assert_eq!(normalize_url("sqlite://argdb.db").unwrap(), "argdb.db");
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(normalize_url("argdb.db").unwrap(), "argdb.db");
        assert_eq!(normalize_url(":memory:").unwrap(), ":memory:");
    }

    #[test]
    fn mysql_url_needs_mysql_build() {
        let result = normalize_url("mysql://u:p@argumentmining.ddns.net:3306/argument-mining");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "database.url",
                ..
            }))
        ));
    }

    #[test]
    fn detects_in_memory_databases() {
        assert!(is_in_memory(":memory:"));
        assert!(is_in_memory("file:argdb?mode=memory&cache=shared"));
        assert!(!is_in_memory("/tmp/argdb.db"));
    }
}
