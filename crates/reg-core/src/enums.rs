//! Roles, entity kinds, and error kinds for Registrar.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A capability a caller may hold. Checked through [`crate::identity::RoleCheck`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Faculty => "faculty",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Every record family persisted in the key-value store.
///
/// Each kind owns a key prefix; see [`crate::keys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Student,
    Enrollment,
    Department,
    Faculty,
    Program,
    Course,
    Extracurricular,
    LedgerUpdate,
    SemesterResult,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Enrollment => "enrollment",
            Self::Department => "department",
            Self::Faculty => "faculty",
            Self::Program => "program",
            Self::Course => "course",
            Self::Extracurricular => "extracurricular",
            Self::LedgerUpdate => "ledger_update",
            Self::SemesterResult => "semester_result",
        }
    }

    /// Prefix of every store key holding a record of this kind.
    ///
    /// `SemesterResult` has no key of its own (results live inside the
    /// enrollment snapshot); it reuses the enrollment prefix.
    #[must_use]
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Student => "STUDENT-",
            Self::Enrollment | Self::SemesterResult => "ENROLLMENT-",
            Self::Department => "DEPARTMENT-",
            Self::Faculty => "FACULTY-",
            Self::Program => "PROGRAM-",
            Self::Course => "COURSE-",
            Self::Extracurricular => "EXTRACURRICULAR-",
            Self::LedgerUpdate => "LEDGERUPDATE-",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Stable category of a failed operation, surfaced to callers as a typed
/// error string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unauthorized,
    InvariantViolation,
    Malformed,
    Conflict,
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Unauthorized => "unauthorized",
            Self::InvariantViolation => "invariant_violation",
            Self::Malformed => "malformed",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
