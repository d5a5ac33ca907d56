//! Serde roundtrip and JsonSchema validation tests for all entity types.

use std::collections::BTreeMap;

use chrono::{FixedOffset, TimeZone};
use schemars::schema_for;
use reg_core::entities::*;
use reg_core::grade::Grade;
use reg_core::responses::*;
use reg_core::semester::Semester;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            pretty_assertions::assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sem(n: u32) -> Semester {
    Semester::new(n).unwrap()
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

fn sample_enrollment() -> Enrollment {
    let mut courses_taken = BTreeMap::new();
    courses_taken.insert(sem(1), vec!["CS101".to_string(), "MA101".to_string()]);
    courses_taken.insert(sem(2), vec!["CS201".to_string()]);
    let mut semester_results = BTreeMap::new();
    semester_results.insert(
        sem(1),
        vec![CourseResult::new("CS101", "A"), CourseResult::new("MA101", "F")],
    );
    Enrollment {
        student_id: "S1".into(),
        name: "Alice".into(),
        program_type: "BTECH".into(),
        department_id: "CSE".into(),
        current_semester: sem(2),
        credits_completed: 12,
        credits_this_semester: 9,
        courses_taken,
        semester_results,
        extracurricular: vec!["ACT1".into()],
        certificates: vec![Certificate {
            activity_id: "ACT1".into(),
            key: "cert-key".into(),
        }],
    }
}

roundtrip_and_validate!(enrollment_roundtrip, Enrollment, sample_enrollment());

roundtrip_and_validate!(
    student_roundtrip,
    Student,
    Student {
        student_id: "S1".into(),
        student_name: "Alice".into(),
        program_type: "BTECH".into(),
        department_id: "CSE".into(),
        max_semesters: 8,
    }
);

roundtrip_and_validate!(
    program_roundtrip,
    Program,
    Program {
        name: "BTECH".into(),
        max_semesters: 8,
        required_credits: 150,
        max_credits_per_semester: 75,
        min_credits_per_semester: 36,
    }
);

roundtrip_and_validate!(
    course_roundtrip,
    Course,
    Course {
        course_id: "CS101".into(),
        name: "Introduction to Programming".into(),
        credits: 12,
        department_id: "CSE".into(),
        faculty_id: "F1".into(),
        description: String::new(),
    }
);

roundtrip_and_validate!(
    department_roundtrip,
    Department,
    Department {
        department_id: "CSE".into(),
        department_name: "Computer Science and Engineering".into(),
    }
);

roundtrip_and_validate!(
    faculty_roundtrip,
    Faculty,
    Faculty {
        faculty_id: "F1".into(),
        faculty_name: "Dr. Rao".into(),
        department_id: "CSE".into(),
    }
);

roundtrip_and_validate!(
    activity_roundtrip,
    ExtracurricularActivity,
    ExtracurricularActivity {
        activity_id: "ACT1".into(),
        name: "Robotics Club".into(),
        description: "Weekly build sessions".into(),
        location: "Lab 3".into(),
        date: "2024-08-01".into(),
        max_count: 30,
        faculty_id: "F1".into(),
    }
);

roundtrip_and_validate!(
    ledger_update_roundtrip,
    LedgerUpdate,
    LedgerUpdate {
        timestamp: ist().with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
        entry: "Student S1 enrolled in BTECH".into(),
        updated_by: "admin".into(),
    }
);

roundtrip_and_validate!(
    grade_update_outcome_roundtrip,
    GradeUpdateOutcome,
    GradeUpdateOutcome {
        student_id: "S1".into(),
        course_id: "CS101".into(),
        semester: sem(1),
        grade: Grade::new("B"),
        sgpa: Some(8.0),
        cgpa: Some(8.0),
        refresh_error: None,
    }
);

roundtrip_and_validate!(
    indexed_ledger_update_roundtrip,
    IndexedLedgerUpdate,
    IndexedLedgerUpdate {
        index: 3,
        update: LedgerUpdate {
            timestamp: ist().with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
            entry: "Added courses [\"CS101\"] for student S1 in Semester1".into(),
            updated_by: "registrar".into(),
        },
    }
);

#[test]
fn ledger_timestamp_keeps_civil_offset() {
    let update = LedgerUpdate {
        timestamp: ist().with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
        entry: "x".into(),
        updated_by: "admin".into(),
    };
    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json["timestamp"], "2024-07-01T09:30:00+05:30");
    assert_eq!(json["updatedBy"], "admin");
}

#[test]
fn semester_label_schema_rejects_bad_label() {
    let schema = serde_json::to_value(schema_for!(Enrollment)).unwrap();
    let mut instance = serde_json::to_value(sample_enrollment()).unwrap();
    instance["currentSemester"] = serde_json::json!("Semester0");
    let errors = validate_against_schema(&schema, &instance);
    assert!(!errors.is_empty());
}
