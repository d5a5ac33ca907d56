//! Cross-cutting error types for Registrar.
//!
//! This module defines the domain taxonomy every operation reports through.
//! Storage failures (`DatabaseError`) and configuration failures
//! (`ConfigError`) are defined in their respective crates and wrap this one.

use thiserror::Error;

use crate::enums::{EntityKind, ErrorKind};

/// Errors that can be raised by any Registrar crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityKind, id: String },

    /// Attempted to create an entity whose ID is already taken.
    #[error("Entity already exists: {entity_type} {id}")]
    AlreadyExists { entity_type: EntityKind, id: String },

    /// The caller does not hold the capability the operation requires.
    #[error("Unauthorized: {caller} may not {action}")]
    Unauthorized { caller: String, action: String },

    /// The operation would break an academic-record invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// An argument could not be decoded or is out of range.
    #[error("Malformed argument: {0}")]
    Malformed(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity_type: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn already_exists(entity_type: EntityKind, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// The stable error category for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::Other(_) => ErrorKind::Storage,
        }
    }
}
