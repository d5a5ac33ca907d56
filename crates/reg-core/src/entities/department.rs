use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegistryRecord;
use crate::enums::{EntityKind, Role};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_id: String,
    pub department_name: String,
}

impl RegistryRecord for Department {
    const KIND: EntityKind = EntityKind::Department;
    const WRITE_ROLES: &'static [Role] = &[Role::Admin];

    fn record_id(&self) -> &str {
        &self.department_id
    }
}
