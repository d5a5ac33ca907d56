//! Entity structs for every record Registrar persists.
//!
//! Each entity is stored as a JSON document under the key
//! `<PREFIX><id>` (see [`crate::keys`]). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.
//! Field names are camelCase on the wire.

mod activity;
mod course;
mod course_result;
mod department;
mod enrollment;
mod faculty;
mod ledger_update;
mod program;
mod student;

pub use activity::ExtracurricularActivity;
pub use course::Course;
pub use course_result::CourseResult;
pub use department::Department;
pub use enrollment::{Certificate, Enrollment};
pub use faculty::Faculty;
pub use ledger_update::LedgerUpdate;
pub use program::Program;
pub use student::Student;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::enums::{EntityKind, Role};
use crate::errors::CoreError;

/// A flat registry record: created, read, listed and deleted by ID.
pub trait RegistryRecord: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    /// Roles allowed to create or delete this record; holding any one suffices.
    const WRITE_ROLES: &'static [Role];

    fn record_id(&self) -> &str;

    /// Other registry records that must exist before this one is created.
    fn references(&self) -> Vec<(EntityKind, &str)> {
        Vec::new()
    }

    /// Field-level checks run before the record is stored.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Malformed` when a field is out of range.
    fn validate(&self) -> Result<(), CoreError> {
        if self.record_id().trim().is_empty() {
            return Err(CoreError::malformed(format!("{} id must not be empty", Self::KIND)));
        }
        Ok(())
    }
}
