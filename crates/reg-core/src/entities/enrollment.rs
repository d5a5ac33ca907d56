use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{CourseResult, Program};
use crate::enums::EntityKind;
use crate::errors::CoreError;
use crate::grade::Grade;
use crate::semester::Semester;

/// Certificate issued for an extracurricular activity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub activity_id: String,
    pub key: String,
}

/// A student's academic record, one per student.
///
/// Every mutation below is pure: callers resolve course credits and the
/// program policy from the registry first, apply the mutation, and persist
/// the snapshot only if it returned `Ok`. A failed mutation leaves `self`
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_id: String,
    pub name: String,
    pub program_type: String,
    pub department_id: String,
    pub current_semester: Semester,
    pub credits_completed: u32,
    pub credits_this_semester: u32,
    #[serde(default)]
    pub courses_taken: BTreeMap<Semester, Vec<String>>,
    #[serde(default)]
    pub semester_results: BTreeMap<Semester, Vec<CourseResult>>,
    #[serde(default)]
    pub extracurricular: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl Enrollment {
    /// A fresh record in the first semester with no history.
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        program_type: impl Into<String>,
        department_id: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            program_type: program_type.into(),
            department_id: department_id.into(),
            current_semester: Semester::FIRST,
            credits_completed: 0,
            credits_this_semester: 0,
            courses_taken: BTreeMap::new(),
            semester_results: BTreeMap::new(),
            extracurricular: Vec::new(),
            certificates: Vec::new(),
        }
    }

    #[must_use]
    pub fn current_courses(&self) -> &[String] {
        self.courses_taken
            .get(&self.current_semester)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn current_results(&self) -> &[CourseResult] {
        self.semester_results
            .get(&self.current_semester)
            .map_or(&[], Vec::as_slice)
    }

    /// The semester in which `course_id` was taken, if ever.
    #[must_use]
    pub fn semester_taking(&self, course_id: &str) -> Option<Semester> {
        self.courses_taken
            .range(..=self.current_semester)
            .find(|(_, courses)| courses.iter().any(|c| c == course_id))
            .map(|(semester, _)| *semester)
    }

    /// The semester holding a recorded result for `course_id`, if any.
    #[must_use]
    pub fn result_for_course(&self, course_id: &str) -> Option<(Semester, &CourseResult)> {
        self.semester_results
            .range(..=self.current_semester)
            .find_map(|(semester, results)| {
                results
                    .iter()
                    .find(|r| r.course_id == course_id)
                    .map(|r| (*semester, r))
            })
    }

    /// Semesters with at least one recorded result, ascending.
    pub fn graded_semesters(&self) -> impl Iterator<Item = Semester> + '_ {
        self.semester_results
            .range(..=self.current_semester)
            .filter(|(_, results)| !results.is_empty())
            .map(|(semester, _)| *semester)
    }

    /// Add courses, given as `(course_id, credits)`, to the current semester.
    ///
    /// Returns the credits added.
    ///
    /// # Errors
    ///
    /// - `Malformed` if `courses` is empty.
    /// - `InvariantViolation` if a course repeats within the request, was
    ///   already taken in any semester, or the load would exceed
    ///   `max_credits_per_semester`.
    pub fn add_courses(&mut self, courses: &[(String, u32)], program: &Program) -> Result<u32, CoreError> {
        if courses.is_empty() {
            return Err(CoreError::malformed("no courses given"));
        }
        reject_repeats(courses.iter().map(|(id, _)| id.as_str()))?;

        for (course_id, _) in courses {
            if let Some(semester) = self.semester_taking(course_id) {
                return Err(CoreError::invariant(format!(
                    "course {course_id} was already taken in {semester}"
                )));
            }
        }

        let total = sum_credits(courses)?;
        let load = self
            .credits_this_semester
            .checked_add(total)
            .filter(|load| *load <= program.max_credits_per_semester)
            .ok_or_else(|| {
                CoreError::invariant(format!(
                    "adding {total} credits to {} would exceed the {} limit of {} credits per semester",
                    self.credits_this_semester, program.name, program.max_credits_per_semester
                ))
            })?;

        self.courses_taken
            .entry(self.current_semester)
            .or_default()
            .extend(courses.iter().map(|(id, _)| id.clone()));
        self.credits_this_semester = load;
        Ok(total)
    }

    /// Remove courses, given as `(course_id, credits)`, from the current
    /// semester and release their credits.
    ///
    /// Returns the credits released.
    ///
    /// # Errors
    ///
    /// - `Malformed` if `courses` is empty.
    /// - `InvariantViolation` if a course repeats within the request, is not
    ///   listed in the current semester, or already has a recorded result.
    pub fn drop_courses(&mut self, courses: &[(String, u32)]) -> Result<u32, CoreError> {
        if courses.is_empty() {
            return Err(CoreError::malformed("no courses given"));
        }
        reject_repeats(courses.iter().map(|(id, _)| id.as_str()))?;

        let current = self.current_semester;
        for (course_id, _) in courses {
            if !self.current_courses().contains(course_id) {
                return Err(CoreError::invariant(format!(
                    "course {course_id} is not taken in {current}"
                )));
            }
            if let Some((graded_in, _)) = self.result_for_course(course_id) {
                return Err(CoreError::invariant(format!(
                    "course {course_id} already has a result in {graded_in}"
                )));
            }
        }

        let total = sum_credits(courses)?;
        if let Some(list) = self.courses_taken.get_mut(&current) {
            list.retain(|id| !courses.iter().any(|(dropped, _)| dropped == id));
            if list.is_empty() {
                self.courses_taken.remove(&current);
            }
        }
        self.credits_this_semester = self.credits_this_semester.saturating_sub(total);
        Ok(total)
    }

    /// Move to the next semester.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` when the student is in the program's last
    /// semester, carries fewer credits than the program minimum, has a course
    /// without a result, or took no courses this semester.
    pub fn advance(&mut self, program: &Program) -> Result<Semester, CoreError> {
        let current = self.current_semester;
        if current >= program.last_semester()? {
            return Err(CoreError::invariant(format!(
                "{current} is the last semester of {}",
                program.name
            )));
        }
        if self.credits_this_semester < program.min_credits_per_semester {
            return Err(CoreError::invariant(format!(
                "{} credits in {current} is below the {} minimum of {}",
                self.credits_this_semester, program.name, program.min_credits_per_semester
            )));
        }
        let taken = self.current_courses().len();
        let graded = self.current_results().len();
        if taken != graded {
            return Err(CoreError::invariant(format!(
                "{graded} of {taken} courses in {current} have results"
            )));
        }
        if taken == 0 {
            return Err(CoreError::invariant(format!("no courses taken in {current}")));
        }

        let next = current.next()?;
        self.current_semester = next;
        self.credits_this_semester = 0;
        Ok(next)
    }

    /// Record results, each paired with its course's credits, in the
    /// current semester.
    ///
    /// Returns the credits earned (failing grades earn none).
    ///
    /// # Errors
    ///
    /// - `Malformed` if `results` is empty.
    /// - `InvariantViolation` if a course repeats within the request, already
    ///   has a result in any semester, or was never taken.
    pub fn record_results(&mut self, results: &[(CourseResult, u32)]) -> Result<u32, CoreError> {
        if results.is_empty() {
            return Err(CoreError::malformed("no results given"));
        }
        reject_repeats(results.iter().map(|(r, _)| r.course_id.as_str()))?;

        let mut earned: u32 = 0;
        for (result, credits) in results {
            let course_id = &result.course_id;
            if let Some((semester, _)) = self.result_for_course(course_id) {
                return Err(CoreError::invariant(format!(
                    "course {course_id} already has a result in {semester}"
                )));
            }
            if self.semester_taking(course_id).is_none() {
                return Err(CoreError::invariant(format!(
                    "course {course_id} was never taken"
                )));
            }
            if !result.grade.is_failing() {
                earned = earned
                    .checked_add(*credits)
                    .ok_or_else(|| CoreError::malformed("credit total overflows"))?;
            }
        }
        let completed = self
            .credits_completed
            .checked_add(earned)
            .ok_or_else(|| CoreError::invariant("completed credits overflow"))?;

        self.semester_results
            .entry(self.current_semester)
            .or_default()
            .extend(results.iter().map(|(r, _)| r.clone()));
        self.credits_completed = completed;
        Ok(earned)
    }

    /// Overwrite the grade of an existing result in place.
    ///
    /// Returns the semester that held the result. `credits_completed` is
    /// left unchanged even when the grade moves to or from a failing one.
    ///
    /// # Errors
    ///
    /// `NotFound` if no result for `course_id` exists.
    pub fn update_grade(&mut self, course_id: &str, grade: Grade) -> Result<Semester, CoreError> {
        let current = self.current_semester;
        for (semester, results) in self.semester_results.range_mut(..=current) {
            if let Some(result) = results.iter_mut().find(|r| r.course_id == course_id) {
                result.grade = grade;
                return Ok(*semester);
            }
        }
        Err(CoreError::not_found(EntityKind::SemesterResult, course_id))
    }

    /// # Errors
    ///
    /// `InvariantViolation` if the student already joined the activity.
    pub fn join_activity(&mut self, activity_id: &str) -> Result<(), CoreError> {
        if self.extracurricular.iter().any(|a| a == activity_id) {
            return Err(CoreError::invariant(format!(
                "student {} already joined activity {activity_id}",
                self.student_id
            )));
        }
        self.extracurricular.push(activity_id.to_string());
        Ok(())
    }

    /// Insert a certificate, replacing the key of an existing certificate
    /// for the same activity. Returns `true` if one was replaced.
    pub fn upsert_certificate(&mut self, certificate: Certificate) -> bool {
        if let Some(existing) = self
            .certificates
            .iter_mut()
            .find(|c| c.activity_id == certificate.activity_id)
        {
            existing.key = certificate.key;
            return true;
        }
        self.certificates.push(certificate);
        false
    }
}

fn reject_repeats<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::invariant(format!("course {id} is listed twice")));
        }
    }
    Ok(())
}

fn sum_credits(courses: &[(String, u32)]) -> Result<u32, CoreError> {
    courses
        .iter()
        .try_fold(0u32, |acc, (_, credits)| acc.checked_add(*credits))
        .ok_or_else(|| CoreError::malformed("credit total overflows"))
}
