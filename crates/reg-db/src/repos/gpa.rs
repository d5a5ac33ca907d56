//! GPA service: SGPA per semester, CGPA across history, and the SGPA cache.
//!
//! Values are always computed from `SemesterResults` and the course credits
//! in the registry. The cache only short-circuits `get_sgpa` while the
//! enrollment snapshot and every graded course record are unchanged.

use std::collections::BTreeMap;

use reg_core::entities::{Course, CourseResult, Enrollment};
use reg_core::enums::EntityKind;
use reg_core::errors::CoreError;
use reg_core::gpa::GpaAccumulator;
use reg_core::keys::{enrollment_key, record_key};
use reg_core::responses::SgpaReport;
use reg_core::semester::Semester;
use tracing::debug;

use crate::error::DatabaseError;
use crate::repos::registry::require_record;
use crate::repos::student::load_enrollment;
use crate::service::RegistrarService;
use crate::sgpa_cache::SgpaStamp;
use crate::txn::Txn;

fn course_version(txn: &Txn<'_>, course_id: &str) -> i64 {
    txn.observed_version(&record_key(EntityKind::Course, course_id))
        .unwrap_or_default()
}

/// Add `results` to `acc`, noting in `stamp` the version of each course read.
async fn accumulate(
    txn: &mut Txn<'_>,
    acc: &mut GpaAccumulator,
    results: &[CourseResult],
    stamp: &mut SgpaStamp,
) -> Result<(), DatabaseError> {
    for result in results {
        let course: Course = require_record(txn, &result.course_id).await?;
        acc.add(&result.grade, course.credits);
        stamp
            .courses
            .insert(result.course_id.clone(), course_version(txn, &result.course_id));
    }
    Ok(())
}

/// Whether every course in `stamp` is still stored at the recorded version.
async fn courses_unchanged(txn: &mut Txn<'_>, stamp: &SgpaStamp) -> Result<bool, DatabaseError> {
    for (course_id, version) in &stamp.courses {
        txn.get(&record_key(EntityKind::Course, course_id)).await?;
        if course_version(txn, course_id) != *version {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Enrollment plus the store version it was read at.
async fn load_versioned(
    txn: &mut Txn<'_>,
    student_id: &str,
) -> Result<(Enrollment, i64), DatabaseError> {
    let enrollment = load_enrollment(txn, student_id).await?;
    let version = txn
        .observed_version(&enrollment_key(student_id))
        .unwrap_or_default();
    Ok((enrollment, version))
}

impl RegistrarService {
    /// SGPA of one semester, rounded to two places. Also stored in the
    /// SGPA cache.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student, a semester without
    /// results, or a graded course missing from the registry.
    pub async fn calculate_sgpa(
        &self,
        student_id: &str,
        semester: Semester,
    ) -> Result<f64, DatabaseError> {
        let mut txn = self.db().begin();
        let (enrollment, version) = load_versioned(&mut txn, student_id).await?;
        let results = enrollment
            .semester_results
            .get(&semester)
            .ok_or_else(|| CoreError::not_found(EntityKind::SemesterResult, semester.label()))?;

        let mut acc = GpaAccumulator::new();
        let mut stamp = SgpaStamp::new(version);
        accumulate(&mut txn, &mut acc, results, &mut stamp).await?;
        let sgpa = acc.average();

        self.sgpa_cache()
            .put_semester(student_id, stamp, semester, sgpa)
            .await;
        debug!(student_id, semester = %semester, sgpa, "SGPA calculated");
        Ok(sgpa)
    }

    /// CGPA over every semester up to the current one, as one cumulative
    /// credit-weighted ratio. `0.0` when nothing is graded yet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student or a graded course missing
    /// from the registry.
    pub async fn calculate_cgpa(&self, student_id: &str) -> Result<f64, DatabaseError> {
        let mut txn = self.db().begin();
        let enrollment = load_enrollment(&mut txn, student_id).await?;

        let mut acc = GpaAccumulator::new();
        let mut stamp = SgpaStamp::default();
        for (_, results) in enrollment
            .semester_results
            .range(..=enrollment.current_semester)
        {
            accumulate(&mut txn, &mut acc, results, &mut stamp).await?;
        }
        let cgpa = acc.average();
        debug!(student_id, cgpa, credits = acc.credits(), "CGPA calculated");
        Ok(cgpa)
    }

    /// SGPA of every graded semester.
    ///
    /// Served from the cache when it matches the current enrollment
    /// snapshot, every graded course is still at the version it was read
    /// at, and every graded semester is covered. Rebuilt otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown student or a graded course missing
    /// from the registry.
    pub async fn get_sgpa(&self, student_id: &str) -> Result<SgpaReport, DatabaseError> {
        let mut txn = self.db().begin();
        let (enrollment, version) = load_versioned(&mut txn, student_id).await?;
        let graded: Vec<Semester> = enrollment.graded_semesters().collect();

        if let Some(cached) = self.sgpa_cache().get(student_id, version).await
            && cached.sgpa.keys().copied().eq(graded.iter().copied())
            && courses_unchanged(&mut txn, &cached.stamp).await?
        {
            return Ok(SgpaReport {
                student_id: student_id.to_string(),
                sgpa: cached.sgpa,
            });
        }

        let mut sgpa = BTreeMap::new();
        let mut stamp = SgpaStamp::new(version);
        for semester in graded {
            let mut acc = GpaAccumulator::new();
            if let Some(results) = enrollment.semester_results.get(&semester) {
                accumulate(&mut txn, &mut acc, results, &mut stamp).await?;
            }
            sgpa.insert(semester, acc.average());
        }
        self.sgpa_cache()
            .replace(student_id, stamp, sgpa.clone())
            .await;
        debug!(student_id, semesters = sgpa.len(), "SGPA cache rebuilt");

        Ok(SgpaReport {
            student_id: student_id.to_string(),
            sgpa,
        })
    }

    /// Drop the cached SGPA values of a student. Returns whether any existed.
    pub async fn invalidate_sgpa(&self, student_id: &str) -> bool {
        self.sgpa_cache().invalidate(student_id).await
    }
}
