//! Student repository: initial enrollment and student lookups.

use reg_core::entities::{Department, Enrollment, Program, Student};
use reg_core::enums::EntityKind;
use reg_core::errors::CoreError;
use reg_core::keys::{enrollment_key, student_key};
use tracing::debug;

use crate::error::DatabaseError;
use crate::repos::registry::require_record;
use crate::service::{RegistrarService, require_id};
use crate::txn::Txn;

/// Read a student's enrollment snapshot inside `txn`.
pub(crate) async fn load_enrollment(
    txn: &mut Txn<'_>,
    student_id: &str,
) -> Result<Enrollment, DatabaseError> {
    txn.get_json(&enrollment_key(student_id))
        .await?
        .ok_or_else(|| CoreError::not_found(EntityKind::Student, student_id).into())
}

impl RegistrarService {
    /// Create a student in the first semester of `program_type`.
    ///
    /// Writes both the `STUDENT-` summary and the `ENROLLMENT-` snapshot.
    ///
    /// # Errors
    ///
    /// - `Malformed` on a blank student ID.
    /// - `AlreadyExists` if the student exists.
    /// - `NotFound` if the program or department does not exist.
    pub async fn initial_enrollment(
        &self,
        caller: &str,
        student_id: &str,
        name: &str,
        program_type: &str,
        department_id: &str,
    ) -> Result<Enrollment, DatabaseError> {
        require_id("student id", student_id)?;

        let mut txn = self.db().begin();
        if txn.exists(&student_key(student_id)).await?
            || txn.exists(&enrollment_key(student_id)).await?
        {
            return Err(CoreError::already_exists(EntityKind::Student, student_id).into());
        }
        let program: Program = require_record(&mut txn, program_type).await?;
        require_record::<Department>(&mut txn, department_id).await?;

        let student = Student {
            student_id: student_id.to_string(),
            student_name: name.to_string(),
            program_type: program_type.to_string(),
            department_id: department_id.to_string(),
            max_semesters: program.max_semesters,
        };
        let enrollment = Enrollment::new(student_id, name, program_type, department_id);

        txn.put_json(student_key(student_id), &student)?;
        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!(
                "Student {student_id} ({name}) enrolled in {program_type}, department {department_id}, {}",
                enrollment.current_semester
            ),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, program_type, "initial enrollment");
        Ok(enrollment)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the student does not exist.
    pub async fn get_student(&self, student_id: &str) -> Result<Student, DatabaseError> {
        let mut txn = self.db().begin();
        txn.get_json(&student_key(student_id))
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Student, student_id).into())
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the student does not exist.
    pub async fn get_enrollment(&self, student_id: &str) -> Result<Enrollment, DatabaseError> {
        let mut txn = self.db().begin();
        load_enrollment(&mut txn, student_id).await
    }

    /// All student summaries, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the scan fails or a record is corrupt.
    pub async fn list_students(&self) -> Result<Vec<Student>, DatabaseError> {
        let mut txn = self.db().begin();
        txn.scan_json(EntityKind::Student.key_prefix()).await
    }

    /// IDs of every student who has taken `course_id` in any semester.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the scan fails or a record is corrupt.
    pub async fn students_taking_course(&self, course_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut txn = self.db().begin();
        let enrollments: Vec<Enrollment> = txn.scan_json(EntityKind::Enrollment.key_prefix()).await?;
        Ok(enrollments
            .into_iter()
            .filter(|e| e.courses_taken.values().any(|ids| ids.iter().any(|c| c == course_id)))
            .map(|e| e.student_id)
            .collect())
    }
}
