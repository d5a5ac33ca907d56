//! # reg-db
//!
//! libSQL-backed persistence and the academic record service for Registrar.
//!
//! All state lives in one flat key-value table. Every operation runs as a
//! single [`txn::Txn`]: it reads through the transaction, buffers its writes,
//! and commits once, with optimistic version checks on everything it read.
//! The audit log, the entity registry, the enrollment state machine, and
//! result recording are all `impl RegistrarService` blocks under [`repos`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod seed;
pub mod service;
pub mod sgpa_cache;
pub mod txn;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::Mutex;
use txn::Txn;

/// Central database handle for all Registrar state.
pub struct RegistrarDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    commit_lock: Mutex<()>,
}

impl RegistrarDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let reg_db = Self {
            db,
            conn,
            commit_lock: Mutex::new(()),
        };
        reg_db.run_migrations().await?;
        Ok(reg_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Start a unit of work.
    #[must_use]
    pub fn begin(&self) -> Txn<'_> {
        Txn::new(self)
    }

    /// Current committed version of `key`; `0` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn version_of(&self, key: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT version FROM kv_store WHERE key = ?1", [key])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(row.get::<i64>(0)?),
            None => Ok(0),
        }
    }
}
