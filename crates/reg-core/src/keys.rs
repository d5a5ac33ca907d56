//! Store key layout.
//!
//! Every record lives under `<PREFIX><id>`; see [`EntityKind::key_prefix`].
//! The audit log additionally uses one counter key holding its length as a
//! decimal string.

use crate::enums::EntityKind;

/// Counter key holding the current audit log length.
pub const LEDGER_UPDATE_COUNT: &str = "LEDGERUPDATE_COUNT";

/// Key of a record of `kind` with the given ID.
#[must_use]
pub fn record_key(kind: EntityKind, id: &str) -> String {
    format!("{}{id}", kind.key_prefix())
}

#[must_use]
pub fn student_key(student_id: &str) -> String {
    record_key(EntityKind::Student, student_id)
}

#[must_use]
pub fn enrollment_key(student_id: &str) -> String {
    record_key(EntityKind::Enrollment, student_id)
}

/// Key of the audit entry at zero-based `index`.
#[must_use]
pub fn ledger_update_key(index: u64) -> String {
    format!("{}{index}", EntityKind::LedgerUpdate.key_prefix())
}
