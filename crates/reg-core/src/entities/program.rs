use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegistryRecord;
use crate::enums::{EntityKind, Role};
use crate::errors::CoreError;
use crate::semester::Semester;

/// Policy record bounding semester count and per-semester credit load.
///
/// Keyed by `name`. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub name: String,
    pub max_semesters: u32,
    pub required_credits: u32,
    pub max_credits_per_semester: u32,
    pub min_credits_per_semester: u32,
}

impl Program {
    /// The terminal semester of this program.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Malformed` if `max_semesters` is zero.
    pub fn last_semester(&self) -> Result<Semester, CoreError> {
        Semester::new(self.max_semesters)
    }
}

impl RegistryRecord for Program {
    const KIND: EntityKind = EntityKind::Program;
    const WRITE_ROLES: &'static [Role] = &[Role::Admin];

    fn record_id(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::malformed("program name must not be empty"));
        }
        if self.max_semesters == 0 {
            return Err(CoreError::malformed(format!(
                "program {} must have at least one semester",
                self.name
            )));
        }
        if self.min_credits_per_semester > self.max_credits_per_semester {
            return Err(CoreError::malformed(format!(
                "program {}: minimum credits per semester ({}) exceed the maximum ({})",
                self.name, self.min_credits_per_semester, self.max_credits_per_semester
            )));
        }
        Ok(())
    }
}
