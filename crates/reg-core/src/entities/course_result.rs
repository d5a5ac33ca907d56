use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// A grade recorded for one course.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseResult {
    pub course_id: String,
    pub grade: Grade,
}

impl CourseResult {
    pub fn new(course_id: impl Into<String>, grade: impl Into<Grade>) -> Self {
        Self {
            course_id: course_id.into(),
            grade: grade.into(),
        }
    }
}
