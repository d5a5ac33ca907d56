//! Enrollment state machine: course load and semester transitions.
//!
//! Each operation reads the enrollment snapshot and the registry records it
//! needs through one `Txn`, applies the pure transition on
//! [`Enrollment`], then writes the snapshot and one audit entry in the same
//! commit.

use reg_core::entities::{Course, Enrollment, Program};
use reg_core::enums::Role;
use reg_core::keys::enrollment_key;
use tracing::debug;

use crate::error::DatabaseError;
use crate::repos::registry::require_record;
use crate::repos::student::load_enrollment;
use crate::service::RegistrarService;
use crate::txn::Txn;

const COURSE_APPROVERS: &[Role] = &[Role::Admin, Role::Faculty];

/// Resolve each course ID to `(id, credits)`.
pub(crate) async fn resolve_credits(
    txn: &mut Txn<'_>,
    course_ids: &[String],
) -> Result<Vec<(String, u32)>, DatabaseError> {
    let mut resolved = Vec::with_capacity(course_ids.len());
    for course_id in course_ids {
        let course: Course = require_record(txn, course_id).await?;
        resolved.push((course.course_id, course.credits));
    }
    Ok(resolved)
}

impl RegistrarService {
    /// Add courses to the student's current semester.
    ///
    /// Requires both the admin and the faculty role.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless `caller` is admin and faculty.
    /// - `NotFound` for an unknown student or course.
    /// - `InvariantViolation` for a retake, a repeated ID, or a credit load
    ///   above the program maximum.
    pub async fn add_courses_to_current_semester(
        &self,
        caller: &str,
        student_id: &str,
        course_ids: &[String],
    ) -> Result<Enrollment, DatabaseError> {
        self.require_all_roles(caller, COURSE_APPROVERS, "add courses")?;

        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let program: Program = require_record(&mut txn, &enrollment.program_type).await?;
        let courses = resolve_credits(&mut txn, course_ids).await?;

        let added = enrollment.add_courses(&courses, &program)?;

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!(
                "Added courses {course_ids:?} ({added} credits) for student {student_id} in {}",
                enrollment.current_semester
            ),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, ?course_ids, added, "courses added");
        Ok(enrollment)
    }

    /// Drop courses from the student's current semester, releasing their
    /// credits.
    ///
    /// Requires both the admin and the faculty role.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless `caller` is admin and faculty.
    /// - `NotFound` for an unknown student or course.
    /// - `InvariantViolation` if a course is not in the current semester or
    ///   already has a result.
    pub async fn drop_courses_from_current_semester(
        &self,
        caller: &str,
        student_id: &str,
        course_ids: &[String],
    ) -> Result<Enrollment, DatabaseError> {
        self.require_all_roles(caller, COURSE_APPROVERS, "drop courses")?;

        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let courses = resolve_credits(&mut txn, course_ids).await?;

        let released = enrollment.drop_courses(&courses)?;

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!(
                "Dropped courses {course_ids:?} ({released} credits) for student {student_id} in {}",
                enrollment.current_semester
            ),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, ?course_ids, released, "courses dropped");
        Ok(enrollment)
    }

    /// Advance the student to the next semester.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown student or program.
    /// - `InvariantViolation` at the last semester, below the credit
    ///   minimum, with ungraded courses, or with no courses.
    pub async fn enroll_student_into_next_semester(
        &self,
        caller: &str,
        student_id: &str,
    ) -> Result<Enrollment, DatabaseError> {
        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let program: Program = require_record(&mut txn, &enrollment.program_type).await?;

        let previous = enrollment.current_semester;
        let next = enrollment.advance(&program)?;

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!("Student {student_id} advanced from {previous} to {next}"),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, semester = %next, "semester advanced");
        Ok(enrollment)
    }
}
