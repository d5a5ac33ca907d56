//! Shared test utilities for reg-db unit tests.

pub(crate) mod helpers {
    use std::sync::Arc;

    use chrono::FixedOffset;
    use reg_core::entities::{Course, Department, Faculty, Program};
    use reg_core::enums::Role;
    use reg_core::identity::StaticRoles;

    use crate::RegistrarDb;
    use crate::service::RegistrarService;

    pub const ADMIN: &str = "registrar";
    pub const PROF: &str = "prof";
    pub const CLERK: &str = "clerk";
    pub const STUDENT: &str = "alice";

    pub fn roles() -> StaticRoles {
        StaticRoles::new()
            .grant(ADMIN, [Role::Admin, Role::Faculty])
            .grant(PROF, [Role::Faculty])
            .grant(CLERK, [Role::Admin])
            .grant(STUDENT, [Role::Student])
    }

    pub fn ist() -> FixedOffset {
        FixedOffset::east_opt(19_800).unwrap()
    }

    /// In-memory service with the standard role table.
    pub async fn test_service() -> RegistrarService {
        let db = RegistrarDb::open_local(":memory:").await.unwrap();
        RegistrarService::from_db(db, Arc::new(roles()), ist())
    }

    pub fn btech() -> Program {
        Program {
            name: "BTECH".into(),
            max_semesters: 8,
            required_credits: 150,
            max_credits_per_semester: 75,
            min_credits_per_semester: 36,
        }
    }

    pub fn course(id: &str, credits: u32) -> Course {
        Course {
            course_id: id.into(),
            name: format!("Course {id}"),
            credits,
            department_id: "CSE".into(),
            faculty_id: "F1".into(),
            description: String::new(),
        }
    }

    /// CSE department, faculty F1, program BTECH (75 max / 36 min), and the
    /// given courses.
    pub async fn registry_with(svc: &RegistrarService, courses: &[(&str, u32)]) {
        svc.create_record(
            ADMIN,
            Department {
                department_id: "CSE".into(),
                department_name: "Computer Science and Engineering".into(),
            },
        )
        .await
        .unwrap();
        svc.create_record(
            ADMIN,
            Faculty {
                faculty_id: "F1".into(),
                faculty_name: "Dr. Rao".into(),
                department_id: "CSE".into(),
            },
        )
        .await
        .unwrap();
        svc.create_record(ADMIN, btech()).await.unwrap();
        for (id, credits) in courses {
            svc.create_record(ADMIN, course(id, *credits)).await.unwrap();
        }
    }

    /// Registry plus student S1 enrolled in BTECH/CSE.
    pub async fn enrolled_service(courses: &[(&str, u32)]) -> RegistrarService {
        let svc = test_service().await;
        registry_with(&svc, courses).await;
        svc.initial_enrollment(ADMIN, "S1", "Alice", "BTECH", "CSE")
            .await
            .unwrap();
        svc
    }

    pub fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }
}
