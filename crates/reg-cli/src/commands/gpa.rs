use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GpaCommands;
use crate::commands::shared::parse::parse_semester;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar gpa`.
pub async fn handle(action: &GpaCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        GpaCommands::Sgpa {
            student_id,
            semester: Some(semester),
        } => {
            let semester = parse_semester(semester)?;
            let sgpa = svc.calculate_sgpa(student_id, semester).await?;
            output(
                &json!({ "studentId": student_id, "semester": semester, "sgpa": sgpa }),
                flags.format,
            )
        }
        GpaCommands::Sgpa {
            student_id,
            semester: None,
        } => output(&svc.get_sgpa(student_id).await?, flags.format),
        GpaCommands::Cgpa { student_id } => {
            let cgpa = svc.calculate_cgpa(student_id).await?;
            output(&json!({ "studentId": student_id, "cgpa": cgpa }), flags.format)
        }
        GpaCommands::Cache {
            student_id,
            clear: true,
        } => {
            let cleared = svc.invalidate_sgpa(student_id).await;
            output(&json!({ "studentId": student_id, "cleared": cleared }), flags.format)
        }
        GpaCommands::Cache {
            student_id,
            clear: false,
        } => {
            let cached = svc.sgpa_cache().peek(student_id).await;
            let body = match cached {
                Some(entry) => json!({
                    "studentId": student_id,
                    "version": entry.stamp.enrollment,
                    "courseVersions": entry.stamp.courses,
                    "sgpa": entry.sgpa,
                }),
                None => json!({ "studentId": student_id, "sgpa": null }),
            };
            output(&body, flags.format)
        }
    }
}
