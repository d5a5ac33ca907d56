use reg_core::grade::Grade;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResultCommands;
use crate::commands::shared::parse::{parse_results, parse_semester};
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar result`.
pub async fn handle(
    action: &ResultCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ResultCommands::Add {
            student_id,
            results,
        } => {
            let results = parse_results(results)?;
            let enrollment = svc
                .add_result_for_current_semester(ctx.caller(), student_id, &results)
                .await?;
            output(&enrollment, flags.format)
        }
        ResultCommands::UpdateGrade {
            student_id,
            course_id,
            grade,
        } => {
            let outcome = svc
                .update_grade_for_course(ctx.caller(), student_id, course_id, Grade::new(grade.as_str()))
                .await?;
            if let Some(error) = &outcome.refresh_error {
                tracing::warn!(%error, "grade stored but GPA refresh failed");
            }
            output(&outcome, flags.format)
        }
        ResultCommands::Course {
            student_id,
            course_id,
        } => output(
            &svc.get_result_for_course(student_id, course_id).await?,
            flags.format,
        ),
        ResultCommands::Semester {
            student_id,
            semester,
        } => {
            let semester = parse_semester(semester)?;
            output(
                &svc.get_result_for_semester(student_id, semester).await?,
                flags.format,
            )
        }
        ResultCommands::All { student_id } => output(
            &svc.get_results_for_all_semesters(student_id).await?,
            flags.format,
        ),
    }
}
