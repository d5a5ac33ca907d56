//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::RegistrarDb;
use crate::error::DatabaseError;

/// The key-value table.
const MIGRATION_001: &str = include_str!("../migrations/001_kv_store.sql");

impl RegistrarDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_kv_store: {e}")))?;
        Ok(())
    }
}
