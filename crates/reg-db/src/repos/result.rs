//! Result and grading repository.
//!
//! Records grades for the current semester under the once-ever rule,
//! feeds completed credits, and rewrites grades in place. A grade update
//! commits first; the GPA refresh that follows is a separate best-effort
//! step whose failure is reported in [`GradeUpdateOutcome`] and never
//! rolls the grade back.

use std::collections::BTreeMap;

use reg_core::entities::{Course, CourseResult, Enrollment};
use reg_core::enums::{EntityKind, Role};
use reg_core::errors::CoreError;
use reg_core::grade::Grade;
use reg_core::keys::enrollment_key;
use reg_core::responses::{CourseResultLookup, GradeUpdateOutcome};
use reg_core::semester::Semester;
use tracing::{debug, warn};

use crate::error::DatabaseError;
use crate::repos::registry::require_record;
use crate::repos::student::load_enrollment;
use crate::service::RegistrarService;

const GRADERS: &[Role] = &[Role::Admin, Role::Faculty];

impl RegistrarService {
    /// Record results for courses in the student's current semester.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless `caller` is admin or faculty.
    /// - `NotFound` for an unknown student or course.
    /// - `InvariantViolation` if a course already has a result anywhere in
    ///   the student's history, or was never taken.
    pub async fn add_result_for_current_semester(
        &self,
        caller: &str,
        student_id: &str,
        results: &[CourseResult],
    ) -> Result<Enrollment, DatabaseError> {
        self.require_any_role(caller, GRADERS, "add results")?;

        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let mut graded = Vec::with_capacity(results.len());
        for result in results {
            let course: Course = require_record(&mut txn, &result.course_id).await?;
            graded.push((result.clone(), course.credits));
        }

        let earned = enrollment.record_results(&graded)?;

        let summary: Vec<String> = results
            .iter()
            .map(|r| format!("{}={}", r.course_id, r.grade))
            .collect();
        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!(
                "Added results [{}] for student {student_id} in {} ({earned} credits earned)",
                summary.join(", "),
                enrollment.current_semester
            ),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, count = results.len(), earned, "results recorded");
        Ok(enrollment)
    }

    /// Overwrite the grade of an existing result, then refresh SGPA for its
    /// semester and CGPA.
    ///
    /// `credits_completed` is not adjusted when a grade moves to or from `F`.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` unless `caller` is admin or faculty.
    /// - `NotFound` for an unknown student or a course without a result.
    ///
    /// Refresh failures are not errors; see [`GradeUpdateOutcome`].
    pub async fn update_grade_for_course(
        &self,
        caller: &str,
        student_id: &str,
        course_id: &str,
        grade: Grade,
    ) -> Result<GradeUpdateOutcome, DatabaseError> {
        self.require_any_role(caller, GRADERS, "update grades")?;

        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let semester = enrollment.update_grade(course_id, grade.clone())?;

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!("Updated grade of {course_id} for student {student_id} in {semester} to {grade}"),
        )
        .await?;
        txn.commit().await?;
        debug!(student_id, course_id, semester = %semester, "grade updated");

        let mut outcome = GradeUpdateOutcome {
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            semester,
            grade,
            sgpa: None,
            cgpa: None,
            refresh_error: None,
        };
        let refreshed = match self.calculate_sgpa(student_id, semester).await {
            Ok(sgpa) => {
                outcome.sgpa = Some(sgpa);
                self.calculate_cgpa(student_id).await
            }
            Err(e) => Err(e),
        };
        match refreshed {
            Ok(cgpa) => outcome.cgpa = Some(cgpa),
            Err(e) => {
                warn!(student_id, course_id, error = %e, "GPA refresh after grade update failed");
                outcome.refresh_error = Some(e.to_string());
            }
        }
        Ok(outcome)
    }

    /// The recorded result for `course_id` and the semester holding it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student or a course without a result.
    pub async fn get_result_for_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<CourseResultLookup, DatabaseError> {
        let enrollment = self.get_enrollment(student_id).await?;
        enrollment
            .result_for_course(course_id)
            .map(|(semester, result)| CourseResultLookup {
                semester,
                result: result.clone(),
            })
            .ok_or_else(|| CoreError::not_found(EntityKind::SemesterResult, course_id).into())
    }

    /// Results recorded in `semester`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student or a semester without results.
    pub async fn get_result_for_semester(
        &self,
        student_id: &str,
        semester: Semester,
    ) -> Result<Vec<CourseResult>, DatabaseError> {
        let enrollment = self.get_enrollment(student_id).await?;
        enrollment
            .semester_results
            .get(&semester)
            .cloned()
            .ok_or_else(|| CoreError::not_found(EntityKind::SemesterResult, semester.label()).into())
    }

    /// Every semester's results, in semester order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student.
    pub async fn get_results_for_all_semesters(
        &self,
        student_id: &str,
    ) -> Result<BTreeMap<Semester, Vec<CourseResult>>, DatabaseError> {
        Ok(self.get_enrollment(student_id).await?.semester_results)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::enums::ErrorKind;

    use crate::test_support::helpers::{ADMIN, PROF, STUDENT, enrolled_service, ids};

    use super::*;

    fn sem(n: u32) -> Semester {
        Semester::new(n).unwrap()
    }

    async fn with_cs101_taken() -> RegistrarService {
        let svc = enrolled_service(&[("CS101", 12), ("MA101", 6)]).await;
        svc.add_courses_to_current_semester(ADMIN, "S1", &ids(&["CS101", "MA101"]))
            .await
            .unwrap();
        svc
    }

    #[tokio::test]
    async fn adding_result_credits_completion() {
        let svc = with_cs101_taken().await;
        let e = svc
            .add_result_for_current_semester(PROF, "S1", &[CourseResult::new("CS101", "A")])
            .await
            .unwrap();
        assert_eq!(e.credits_completed, 12);
        assert_eq!(e.semester_results[&sem(1)], vec![CourseResult::new("CS101", "A")]);
    }

    #[tokio::test]
    async fn failing_grade_consumes_once_slot_without_credits() {
        let svc = with_cs101_taken().await;
        let e = svc
            .add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("MA101", "F")])
            .await
            .unwrap();
        assert_eq!(e.credits_completed, 0);

        let err = svc
            .add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("MA101", "A")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[tokio::test]
    async fn students_cannot_record_results() {
        let svc = with_cs101_taken().await;
        let err = svc
            .add_result_for_current_semester(STUDENT, "S1", &[CourseResult::new("CS101", "S")])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn unrecognized_grade_is_stored_verbatim() {
        let svc = with_cs101_taken().await;
        svc.add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("CS101", "P")])
            .await
            .unwrap();
        let found = svc.get_result_for_course("S1", "CS101").await.unwrap();
        assert_eq!(found.result.grade.as_str(), "P");
        assert_eq!(svc.calculate_sgpa("S1", sem(1)).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn update_grade_refreshes_gpa() {
        let svc = with_cs101_taken().await;
        svc.add_result_for_current_semester(
            ADMIN,
            "S1",
            &[CourseResult::new("CS101", "A"), CourseResult::new("MA101", "A")],
        )
        .await
        .unwrap();

        let outcome = svc
            .update_grade_for_course(PROF, "S1", "MA101", Grade::new("S"))
            .await
            .unwrap();
        assert!(outcome.refreshed());
        assert_eq!(outcome.semester, sem(1));
        // (12*9 + 6*10) / 18 = 9.33
        assert_eq!(outcome.sgpa, Some(9.33));
        assert_eq!(outcome.cgpa, Some(9.33));
        assert_eq!(
            svc.get_result_for_course("S1", "MA101").await.unwrap().result.grade,
            Grade::new("S")
        );
    }

    #[tokio::test]
    async fn update_grade_leaves_completed_credits() {
        let svc = with_cs101_taken().await;
        svc.add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("CS101", "F")])
            .await
            .unwrap();
        svc.update_grade_for_course(ADMIN, "S1", "CS101", Grade::new("A"))
            .await
            .unwrap();
        assert_eq!(svc.get_enrollment("S1").await.unwrap().credits_completed, 0);
    }

    #[tokio::test]
    async fn update_grade_without_result_is_not_found() {
        let svc = with_cs101_taken().await;
        let err = svc
            .update_grade_for_course(ADMIN, "S1", "CS101", Grade::new("A"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_committed_grade() {
        let svc = with_cs101_taken().await;
        svc.add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("CS101", "A")])
            .await
            .unwrap();
        // Without the course record the credits cannot be resolved.
        svc.delete_record::<Course>(ADMIN, "CS101").await.unwrap();
        let before = svc.ledger_len().await.unwrap();

        let outcome = svc
            .update_grade_for_course(ADMIN, "S1", "CS101", Grade::new("B"))
            .await
            .unwrap();
        assert!(!outcome.refreshed());
        assert!(outcome.refresh_error.unwrap().contains("course CS101"));
        assert_eq!(outcome.sgpa, None);

        let stored = svc.get_result_for_course("S1", "CS101").await.unwrap();
        assert_eq!(stored.result.grade, Grade::new("B"));
        assert_eq!(svc.ledger_len().await.unwrap(), before + 1);
    }

    #[tokio::test]
    async fn result_queries() {
        let svc = with_cs101_taken().await;
        svc.add_result_for_current_semester(ADMIN, "S1", &[CourseResult::new("CS101", "B")])
            .await
            .unwrap();

        assert_eq!(
            svc.get_result_for_semester("S1", sem(1)).await.unwrap(),
            vec![CourseResult::new("CS101", "B")]
        );
        assert_eq!(
            svc.get_result_for_semester("S1", sem(2)).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        let all = svc.get_results_for_all_semesters("S1").await.unwrap();
        assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![sem(1)]);
        assert_eq!(
            svc.get_result_for_course("S1", "MA101").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
