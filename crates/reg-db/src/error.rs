//! Database error types for reg-db.

use reg_core::enums::ErrorKind;
use reg_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations and the service built on top of it.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed or returned unusable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Invalid state encountered (e.g., bad data in the store).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A key read by the transaction changed before it committed.
    #[error("Commit conflict on key {key}")]
    Conflict { key: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// The stable error category for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(e) => e.kind(),
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Query(_)
            | Self::Migration(_)
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::Storage,
        }
    }

    /// The domain error, if this is one.
    #[must_use]
    pub const fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}
