//! Extracurricular participation and certificates.
//!
//! Joining and certificate issue are keyed on the student's enrollment
//! snapshot. The participant cap is counted from every enrollment that
//! lists the activity, read inside the same transaction.

use reg_core::entities::{Certificate, Enrollment, ExtracurricularActivity};
use reg_core::enums::EntityKind;
use reg_core::errors::CoreError;
use reg_core::keys::enrollment_key;
use tracing::debug;

use crate::error::DatabaseError;
use crate::repos::registry::require_record;
use crate::repos::student::load_enrollment;
use crate::service::{RegistrarService, require_id};
use crate::txn::Txn;

async fn participants(txn: &mut Txn<'_>, activity_id: &str) -> Result<Vec<String>, DatabaseError> {
    let enrollments: Vec<Enrollment> = txn.scan_json(EntityKind::Enrollment.key_prefix()).await?;
    Ok(enrollments
        .into_iter()
        .filter(|e| e.extracurricular.iter().any(|a| a == activity_id))
        .map(|e| e.student_id)
        .collect())
}

impl RegistrarService {
    /// Add an activity to a student's extracurricular list.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the student or activity does not exist.
    /// - `InvariantViolation` if the student already joined or the
    ///   activity is full.
    pub async fn join_activity(
        &self,
        caller: &str,
        student_id: &str,
        activity_id: &str,
    ) -> Result<Enrollment, DatabaseError> {
        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        let activity: ExtracurricularActivity = require_record(&mut txn, activity_id).await?;

        enrollment.join_activity(activity_id)?;
        let joined = participants(&mut txn, activity_id).await?.len();
        if joined >= activity.max_count as usize {
            return Err(CoreError::invariant(format!(
                "activity {activity_id} is full ({joined} of {})",
                activity.max_count
            ))
            .into());
        }

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!("Student {student_id} joined activity {activity_id}"),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, activity_id, "activity joined");
        Ok(enrollment)
    }

    /// Issue or replace the certificate a student holds for an activity.
    ///
    /// # Errors
    ///
    /// - `Malformed` on a blank certificate key.
    /// - `NotFound` if the student or activity does not exist.
    pub async fn add_certificate(
        &self,
        caller: &str,
        student_id: &str,
        activity_id: &str,
        key: &str,
    ) -> Result<Certificate, DatabaseError> {
        require_id("certificate key", key)?;

        let mut txn = self.db().begin();
        let mut enrollment = load_enrollment(&mut txn, student_id).await?;
        require_record::<ExtracurricularActivity>(&mut txn, activity_id).await?;

        let certificate = Certificate {
            activity_id: activity_id.to_string(),
            key: key.to_string(),
        };
        let replaced = enrollment.upsert_certificate(certificate.clone());

        txn.put_json(enrollment_key(student_id), &enrollment)?;
        let verb = if replaced { "Replaced" } else { "Issued" };
        self.append_ledger(
            &mut txn,
            caller,
            format!("{verb} certificate for student {student_id}, activity {activity_id}"),
        )
        .await?;
        txn.commit().await?;

        debug!(student_id, activity_id, replaced, "certificate stored");
        Ok(certificate)
    }

    /// IDs of every student who joined `activity_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the activity does not exist.
    pub async fn students_in_activity(&self, activity_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut txn = self.db().begin();
        require_record::<ExtracurricularActivity>(&mut txn, activity_id).await?;
        participants(&mut txn, activity_id).await
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the student does not exist or holds no
    /// certificate for the activity.
    pub async fn get_certificate(
        &self,
        student_id: &str,
        activity_id: &str,
    ) -> Result<Certificate, DatabaseError> {
        let mut txn = self.db().begin();
        let enrollment = load_enrollment(&mut txn, student_id).await?;
        enrollment
            .certificates
            .into_iter()
            .find(|c| c.activity_id == activity_id)
            .ok_or_else(|| {
                CoreError::not_found(
                    EntityKind::Extracurricular,
                    format!("certificate for {activity_id} held by {student_id}"),
                )
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::enums::ErrorKind;

    use crate::test_support::helpers::{ADMIN, STUDENT, enrolled_service};

    use super::*;

    async fn with_activity(max_count: u32) -> RegistrarService {
        let svc = enrolled_service(&[]).await;
        svc.create_record(
            ADMIN,
            ExtracurricularActivity {
                activity_id: "ACT1".into(),
                name: "Robotics Club".into(),
                description: String::new(),
                location: "Lab 3".into(),
                date: "2024-09-01".into(),
                max_count,
                faculty_id: "F1".into(),
            },
        )
        .await
        .unwrap();
        svc
    }

    #[tokio::test]
    async fn join_records_activity_and_audits() {
        let svc = with_activity(5).await;
        let before = svc.ledger_len().await.unwrap();
        let enrollment = svc.join_activity(STUDENT, "S1", "ACT1").await.unwrap();
        assert_eq!(enrollment.extracurricular, vec!["ACT1".to_string()]);
        assert_eq!(svc.ledger_len().await.unwrap(), before + 1);
        assert_eq!(svc.students_in_activity("ACT1").await.unwrap(), vec!["S1"]);
    }

    #[tokio::test]
    async fn joining_twice_is_rejected() {
        let svc = with_activity(5).await;
        svc.join_activity(ADMIN, "S1", "ACT1").await.unwrap();
        let err = svc.join_activity(ADMIN, "S1", "ACT1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
    }

    #[tokio::test]
    async fn full_activity_is_rejected() {
        let svc = with_activity(1).await;
        svc.initial_enrollment(ADMIN, "S2", "Bob", "BTECH", "CSE")
            .await
            .unwrap();
        svc.join_activity(ADMIN, "S1", "ACT1").await.unwrap();

        let before = svc.ledger_len().await.unwrap();
        let err = svc.join_activity(ADMIN, "S2", "ACT1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert!(err.to_string().contains("full"));
        assert_eq!(svc.ledger_len().await.unwrap(), before);
    }

    #[tokio::test]
    async fn unknown_activity_is_not_found() {
        let svc = with_activity(1).await;
        let err = svc.join_activity(ADMIN, "S1", "NOPE").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn certificate_is_upserted() {
        let svc = with_activity(1).await;
        svc.add_certificate(ADMIN, "S1", "ACT1", "KEY-1").await.unwrap();
        svc.add_certificate(ADMIN, "S1", "ACT1", "KEY-2").await.unwrap();

        let cert = svc.get_certificate("S1", "ACT1").await.unwrap();
        assert_eq!(cert.key, "KEY-2");
        assert_eq!(svc.get_enrollment("S1").await.unwrap().certificates.len(), 1);

        let entries = svc.get_all_ledger_updates().await.unwrap();
        assert!(entries.last().unwrap().entry.starts_with("Replaced certificate"));
    }

    #[tokio::test]
    async fn missing_certificate_is_not_found() {
        let svc = with_activity(1).await;
        let err = svc.get_certificate("S1", "ACT1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn blank_certificate_key_is_malformed() {
        let svc = with_activity(1).await;
        let err = svc.add_certificate(ADMIN, "S1", "ACT1", " ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}
