use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegistryRecord;
use crate::enums::{EntityKind, Role};
use crate::errors::CoreError;

/// An extracurricular activity with a participant cap.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtracurricularActivity {
    pub activity_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    pub max_count: u32,
    pub faculty_id: String,
}

impl RegistryRecord for ExtracurricularActivity {
    const KIND: EntityKind = EntityKind::Extracurricular;
    const WRITE_ROLES: &'static [Role] = &[Role::Admin, Role::Faculty];

    fn record_id(&self) -> &str {
        &self.activity_id
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        vec![(EntityKind::Faculty, self.faculty_id.as_str())]
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.activity_id.trim().is_empty() {
            return Err(CoreError::malformed("activity id must not be empty"));
        }
        if self.max_count == 0 {
            return Err(CoreError::malformed(format!(
                "activity {} must admit at least one participant",
                self.activity_id
            )));
        }
        Ok(())
    }
}
