//! Entity registry repository.
//!
//! Uniform create / get / list / delete for every [`RegistryRecord`]
//! (departments, faculties, programs, courses, extracurricular activities).
//! The rest of the service resolves records through [`lookup_record`].

use reg_core::entities::{Course, ExtracurricularActivity, Faculty, RegistryRecord};
use reg_core::errors::CoreError;
use reg_core::keys::record_key;
use tracing::debug;

use crate::error::DatabaseError;
use crate::service::RegistrarService;
use crate::txn::Txn;

/// `Lookup(id) -> (Record, found)` inside an open transaction.
pub(crate) async fn lookup_record<R: RegistryRecord>(
    txn: &mut Txn<'_>,
    id: &str,
) -> Result<Option<R>, DatabaseError> {
    txn.get_json(&record_key(R::KIND, id)).await
}

/// Like [`lookup_record`] but absence is `NotFound`.
pub(crate) async fn require_record<R: RegistryRecord>(
    txn: &mut Txn<'_>,
    id: &str,
) -> Result<R, DatabaseError> {
    lookup_record(txn, id)
        .await?
        .ok_or_else(|| CoreError::not_found(R::KIND, id).into())
}

impl RegistrarService {
    /// Store a new registry record.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` holds none of the record's write roles.
    /// - `Malformed` if the record fails validation.
    /// - `AlreadyExists` if the ID is taken.
    /// - `NotFound` if a referenced record is missing.
    pub async fn create_record<R: RegistryRecord>(
        &self,
        caller: &str,
        record: R,
    ) -> Result<R, DatabaseError> {
        self.require_any_role(caller, R::WRITE_ROLES, &format!("create {}", R::KIND))?;
        record.validate()?;

        let mut txn = self.db().begin();
        let key = record_key(R::KIND, record.record_id());
        if txn.exists(&key).await? {
            return Err(CoreError::already_exists(R::KIND, record.record_id()).into());
        }
        for (kind, id) in record.references() {
            if !txn.exists(&record_key(kind, id)).await? {
                return Err(CoreError::not_found(kind, id).into());
            }
        }

        txn.put_json(key, &record)?;
        self.append_ledger(
            &mut txn,
            caller,
            format!("Added {} {}", R::KIND, record.record_id()),
        )
        .await?;
        txn.commit().await?;

        debug!(kind = %R::KIND, id = record.record_id(), "registry record created");
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no record has this ID.
    pub async fn get_record<R: RegistryRecord>(&self, id: &str) -> Result<R, DatabaseError> {
        let mut txn = self.db().begin();
        require_record(&mut txn, id).await
    }

    /// All records of one kind, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the scan fails or a record is corrupt.
    pub async fn list_records<R: RegistryRecord>(&self) -> Result<Vec<R>, DatabaseError> {
        let mut txn = self.db().begin();
        txn.scan_json(R::KIND.key_prefix()).await
    }

    /// Remove a registry record. Returns the removed record.
    ///
    /// Students already holding the ID in their history are not touched.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `caller` holds none of the record's write roles.
    /// - `NotFound` if no record has this ID.
    pub async fn delete_record<R: RegistryRecord>(
        &self,
        caller: &str,
        id: &str,
    ) -> Result<R, DatabaseError> {
        self.require_any_role(caller, R::WRITE_ROLES, &format!("delete {}", R::KIND))?;

        let mut txn = self.db().begin();
        let record: R = require_record(&mut txn, id).await?;
        txn.delete(record_key(R::KIND, id));
        self.append_ledger(&mut txn, caller, format!("Removed {} {id}", R::KIND))
            .await?;
        txn.commit().await?;

        debug!(kind = %R::KIND, id, "registry record deleted");
        Ok(record)
    }

    /// Courses taught by `faculty_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the faculty does not exist.
    pub async fn courses_by_faculty(&self, faculty_id: &str) -> Result<Vec<Course>, DatabaseError> {
        let mut txn = self.db().begin();
        require_record::<Faculty>(&mut txn, faculty_id).await?;
        let courses: Vec<Course> = txn.scan_json(Course::KIND.key_prefix()).await?;
        Ok(courses
            .into_iter()
            .filter(|c| c.faculty_id == faculty_id)
            .collect())
    }

    /// Extracurricular activities run by `faculty_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the faculty does not exist.
    pub async fn activities_by_faculty(
        &self,
        faculty_id: &str,
    ) -> Result<Vec<ExtracurricularActivity>, DatabaseError> {
        let mut txn = self.db().begin();
        require_record::<Faculty>(&mut txn, faculty_id).await?;
        let activities: Vec<ExtracurricularActivity> = txn
            .scan_json(ExtracurricularActivity::KIND.key_prefix())
            .await?;
        Ok(activities
            .into_iter()
            .filter(|a| a.faculty_id == faculty_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::entities::{Department, Program};
    use reg_core::enums::ErrorKind;

    use crate::test_support::helpers::{ADMIN, PROF, STUDENT, btech, course, registry_with, test_service};

    use super::*;

    #[tokio::test]
    async fn create_get_list_delete() {
        let svc = test_service().await;
        registry_with(&svc, &[("CS102", 6), ("CS101", 12)]).await;

        let got: Course = svc.get_record("CS101").await.unwrap();
        assert_eq!(got.credits, 12);

        let ids: Vec<String> = svc
            .list_records::<Course>()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.course_id)
            .collect();
        assert_eq!(ids, vec!["CS101".to_string(), "CS102".to_string()]);

        let removed: Course = svc.delete_record(ADMIN, "CS102").await.unwrap();
        assert_eq!(removed.course_id, "CS102");
        let err = svc.get_record::<Course>("CS102").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn duplicate_create_is_already_exists() {
        let svc = test_service().await;
        registry_with(&svc, &[]).await;
        let err = svc.create_record(ADMIN, btech()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn missing_reference_is_not_found() {
        let svc = test_service().await;
        let err = svc.create_record(ADMIN, course("CS101", 12)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("department CSE"), "{err}");
        assert!(svc.get_all_ledger_updates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn write_roles_are_enforced() {
        let svc = test_service().await;
        registry_with(&svc, &[]).await;

        // faculty may add courses but not departments
        svc.create_record(PROF, course("CS201", 6)).await.unwrap();
        let err = svc
            .create_record(
                PROF,
                Department {
                    department_id: "EE".into(),
                    department_name: "Electrical".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = svc.delete_record::<Course>(STUDENT, "CS201").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn invalid_program_is_malformed() {
        let svc = test_service().await;
        let program = Program {
            min_credits_per_semester: 100,
            ..btech()
        };
        let err = svc.create_record(ADMIN, program).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[tokio::test]
    async fn each_registry_write_is_audited() {
        let svc = test_service().await;
        registry_with(&svc, &[("CS101", 12)]).await;
        svc.delete_record::<Course>(ADMIN, "CS101").await.unwrap();

        let entries: Vec<String> = svc
            .get_all_ledger_updates()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.entry)
            .collect();
        assert_eq!(
            entries,
            vec![
                "Added department CSE",
                "Added faculty F1",
                "Added program BTECH",
                "Added course CS101",
                "Removed course CS101",
            ]
        );
    }

    #[tokio::test]
    async fn faculty_scoped_reads() {
        let svc = test_service().await;
        registry_with(&svc, &[("CS101", 12)]).await;
        svc.create_record(
            ADMIN,
            ExtracurricularActivity {
                activity_id: "ROBO".into(),
                name: "Robotics".into(),
                description: String::new(),
                location: String::new(),
                date: String::new(),
                max_count: 2,
                faculty_id: "F1".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(svc.courses_by_faculty("F1").await.unwrap().len(), 1);
        assert_eq!(svc.activities_by_faculty("F1").await.unwrap().len(), 1);
        assert_eq!(
            svc.courses_by_faculty("F9").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }
}
