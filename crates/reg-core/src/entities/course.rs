use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegistryRecord;
use crate::enums::{EntityKind, Role};

/// A course offered by a department and taught by one faculty member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub name: String,
    pub credits: u32,
    pub department_id: String,
    pub faculty_id: String,
    #[serde(default)]
    pub description: String,
}

impl RegistryRecord for Course {
    const KIND: EntityKind = EntityKind::Course;
    const WRITE_ROLES: &'static [Role] = &[Role::Admin, Role::Faculty];

    fn record_id(&self) -> &str {
        &self.course_id
    }

    fn references(&self) -> Vec<(EntityKind, &str)> {
        vec![
            (EntityKind::Department, self.department_id.as_str()),
            (EntityKind::Faculty, self.faculty_id.as_str()),
        ]
    }
}
