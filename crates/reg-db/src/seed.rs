//! Demo registry loader.
//!
//! Creates a small set of departments, faculties, courses and programs so a
//! fresh store can enroll students straight away. Records that already exist
//! are skipped, which makes `seed_registry` safe to run repeatedly.

use reg_core::entities::{Course, Department, Faculty, Program, RegistryRecord};
use reg_core::enums::ErrorKind;
use reg_core::responses::SeedSummary;
use tracing::info;

use crate::error::DatabaseError;
use crate::service::RegistrarService;

const MAX_CREDITS_PER_SEMESTER: u32 = 48;
const MIN_CREDITS_PER_SEMESTER: u32 = 12;

fn departments() -> Vec<Department> {
    [
        ("CSE", "Computer Science and Engineering"),
        ("MAT", "Mathematics"),
        ("ME", "Mechanical Engineering"),
    ]
    .into_iter()
    .map(|(id, name)| Department {
        department_id: id.into(),
        department_name: name.into(),
    })
    .collect()
}

fn faculties() -> Vec<Faculty> {
    vec![
        Faculty {
            faculty_id: "F1".into(),
            faculty_name: "Dr. John Smith".into(),
            department_id: "CSE".into(),
        },
        Faculty {
            faculty_id: "F2".into(),
            faculty_name: "Dr. Emily Johnson".into(),
            department_id: "MAT".into(),
        },
    ]
}

fn courses() -> Vec<Course> {
    vec![
        Course {
            course_id: "CS101".into(),
            name: "Introduction to Computer Science".into(),
            credits: 12,
            department_id: "CSE".into(),
            faculty_id: "F1".into(),
            description: "An introductory course on computer science.".into(),
        },
        Course {
            course_id: "ME5691".into(),
            name: "Mechanics".into(),
            credits: 15,
            department_id: "ME".into(),
            faculty_id: "F2".into(),
            description: "A first-semester Mechanics course.".into(),
        },
    ]
}

fn programs() -> Vec<Program> {
    [
        ("BTech", 8, 150),
        ("DualDegree", 10, 148),
        ("MTech", 4, 148),
        ("MS", 5, 200),
        ("PhD", 10, 500),
    ]
    .into_iter()
    .map(|(name, max_semesters, required_credits)| Program {
        name: name.into(),
        max_semesters,
        required_credits,
        max_credits_per_semester: MAX_CREDITS_PER_SEMESTER,
        min_credits_per_semester: MIN_CREDITS_PER_SEMESTER,
    })
    .collect()
}

impl RegistrarService {
    async fn seed_records<R: RegistryRecord>(
        &self,
        caller: &str,
        records: Vec<R>,
        summary: &mut SeedSummary,
    ) -> Result<(), DatabaseError> {
        for record in records {
            let label = format!("{} {}", R::KIND, record.record_id());
            match self.create_record(caller, record).await {
                Ok(_) => summary.created.push(label),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => summary.skipped.push(label),
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Load the demo registry.
    ///
    /// # Errors
    ///
    /// Returns the first failure other than `AlreadyExists`, typically
    /// `Unauthorized` when `caller` is not an admin.
    pub async fn seed_registry(&self, caller: &str) -> Result<SeedSummary, DatabaseError> {
        let mut summary = SeedSummary::default();
        self.seed_records(caller, departments(), &mut summary).await?;
        self.seed_records(caller, faculties(), &mut summary).await?;
        self.seed_records(caller, courses(), &mut summary).await?;
        self.seed_records(caller, programs(), &mut summary).await?;

        info!(
            created = summary.created.len(),
            skipped = summary.skipped.len(),
            "registry seeded"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::entities::Program;

    use crate::test_support::helpers::{ADMIN, PROF, test_service};

    use super::*;

    #[tokio::test]
    async fn seed_creates_everything_once() {
        let svc = test_service().await;
        let first = svc.seed_registry(ADMIN).await.unwrap();
        assert_eq!(first.created.len(), 12);
        assert!(first.skipped.is_empty());
        assert!(first.created.contains(&"course ME5691".to_string()));

        let second = svc.seed_registry(ADMIN).await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), 12);
        assert_eq!(svc.ledger_len().await.unwrap(), 12);
    }

    #[tokio::test]
    async fn seeded_programs_allow_enrollment() {
        let svc = test_service().await;
        svc.seed_registry(ADMIN).await.unwrap();
        let btech: Program = svc.get_record("BTech").await.unwrap();
        assert_eq!(btech.max_semesters, 8);
        assert_eq!(btech.max_credits_per_semester, 48);

        svc.initial_enrollment(ADMIN, "S1", "Alice", "BTech", "CSE")
            .await
            .unwrap();
        svc.add_courses_to_current_semester(ADMIN, "S1", &["CS101".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn seed_requires_admin() {
        let svc = test_service().await;
        let err = svc.seed_registry(PROF).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
}
