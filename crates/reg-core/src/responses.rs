//! Response shapes returned by service operations and printed by the CLI.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{CourseResult, LedgerUpdate};
use crate::grade::Grade;
use crate::semester::Semester;

/// Outcome of `UpdateGradeForCourse`.
///
/// The grade write and its audit entry are committed before the GPA
/// refresh runs. A refresh failure lands in `refresh_error`; the grade
/// change stands regardless.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdateOutcome {
    pub student_id: String,
    pub course_id: String,
    pub semester: Semester,
    pub grade: Grade,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub refresh_error: Option<String>,
}

impl GradeUpdateOutcome {
    #[must_use]
    pub const fn refreshed(&self) -> bool {
        self.refresh_error.is_none()
    }
}

/// A result together with the semester it was recorded in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseResultLookup {
    pub semester: Semester,
    pub result: CourseResult,
}

/// SGPA per semester for one student.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SgpaReport {
    pub student_id: String,
    pub sgpa: BTreeMap<Semester, f64>,
}

/// An audit entry with its position in the log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexedLedgerUpdate {
    pub index: u64,
    #[serde(flatten)]
    pub update: LedgerUpdate,
}

/// Summary of a ledger export.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerExportSummary {
    pub path: String,
    pub entries: u64,
}

/// Summary of loading the demo registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}
