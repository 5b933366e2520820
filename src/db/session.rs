//! Sessions: one pooled connection checked out of an [`Engine`].
//!
//! [`Engine`]: super::connection::Engine

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::trace;

use super::backend::DbConnection;
use super::row::AduRow;
use super::schema::adus;
use crate::error::{Error, Result};
use crate::model::Adu;

/// A unit of work against the database.
///
/// Holds one connection from the pool for its whole lifetime. Dropping the
/// session (or calling [`Session::close`]) returns the connection. A session
/// is not meant to be shared between threads.
pub struct Session {
    conn: PooledConnection<ConnectionManager<DbConnection>>,
}

impl Session {
    pub(crate) fn new(conn: PooledConnection<ConnectionManager<DbConnection>>) -> Self {
        Self { conn }
    }

    /// Raw Diesel connection for queries not covered by the store API.
    pub fn connection(&mut self) -> &mut DbConnection {
        &mut self.conn
    }

    /// Run `f` inside a transaction. Commits on `Ok`, rolls back on `Err`.
    ///
    /// # Errors
    /// Returns the error of `f`, or a database error if the transaction
    /// cannot be opened or committed.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DbConnection) -> Result<T>,
    {
        let conn: &mut DbConnection = &mut self.conn;
        conn.transaction::<T, Error, _>(f)
    }

    /// Round-trip a trivial query to verify the connection is alive.
    ///
    /// # Errors
    /// Returns a database error if the server does not answer.
    pub fn ping(&mut self) -> Result<()> {
        diesel::sql_query("SELECT 1").execute(self.connection())?;
        Ok(())
    }

    /// All ADU rows, ordered by id.
    ///
    /// # Errors
    /// Returns a database error if the query fails, or a parse error for a
    /// row with an unknown type.
    pub fn adus(&mut self) -> Result<Vec<Adu>> {
        let rows: Vec<AduRow> = adus::table
            .order(adus::id.asc())
            .select(AduRow::as_select())
            .load(self.connection())?;
        rows.into_iter().map(Adu::try_from).collect()
    }

    /// Release the connection back to the pool.
    pub fn close(self) {
        trace!("session closed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
