use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::commands::shared::parse::parse_course_ids;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    let caller = ctx.caller();
    match action {
        StudentCommands::Enroll {
            id,
            name,
            program,
            department,
        } => {
            let enrollment = svc
                .initial_enrollment(caller, id, name, program, department)
                .await?;
            output(&enrollment, flags.format)
        }
        StudentCommands::Get { student_id } => {
            output(&svc.get_student(student_id).await?, flags.format)
        }
        StudentCommands::Enrollment { student_id } => {
            output(&svc.get_enrollment(student_id).await?, flags.format)
        }
        StudentCommands::List => output(&svc.list_students().await?, flags.format),
        StudentCommands::AddCourses {
            student_id,
            courses,
        } => {
            let ids = parse_course_ids(courses)?;
            let enrollment = svc
                .add_courses_to_current_semester(caller, student_id, &ids)
                .await?;
            output(&enrollment, flags.format)
        }
        StudentCommands::DropCourses {
            student_id,
            courses,
        } => {
            let ids = parse_course_ids(courses)?;
            let enrollment = svc
                .drop_courses_from_current_semester(caller, student_id, &ids)
                .await?;
            output(&enrollment, flags.format)
        }
        StudentCommands::NextSemester { student_id } => {
            let enrollment = svc
                .enroll_student_into_next_semester(caller, student_id)
                .await?;
            output(&enrollment, flags.format)
        }
        StudentCommands::JoinActivity {
            student_id,
            activity_id,
        } => {
            let enrollment = svc.join_activity(caller, student_id, activity_id).await?;
            output(&enrollment, flags.format)
        }
        StudentCommands::AddCertificate {
            student_id,
            activity_id,
            key,
        } => {
            let certificate = svc
                .add_certificate(caller, student_id, activity_id, key)
                .await?;
            output(&certificate, flags.format)
        }
        StudentCommands::Certificate {
            student_id,
            activity_id,
        } => output(
            &svc.get_certificate(student_id, activity_id).await?,
            flags.format,
        ),
        StudentCommands::TakingCourse { course_id } => {
            output(&svc.students_taking_course(course_id).await?, flags.format)
        }
        StudentCommands::ActivityMembers { activity_id } => {
            output(&svc.students_in_activity(activity_id).await?, flags.format)
        }
    }
}
