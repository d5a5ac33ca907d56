use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegistryRecord;
use crate::enums::{EntityKind, Role};

/// A faculty member, attached to one department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    pub faculty_id: String,
    pub faculty_name: String,
    pub department_id: String,
}

impl RegistryRecord for Faculty {
    const KIND: EntityKind = EntityKind::Faculty;
    const WRITE_ROLES: &'static [Role] = &[Role::Admin];

    fn record_id(&self) -> &str {
        &self.faculty_id
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        vec![(EntityKind::Department, self.department_id.as_str())]
    }
}
