use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Student summary record, written once at initial enrollment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub student_name: String,
    pub program_type: String,
    pub department_id: String,
    pub max_semesters: u32,
}
