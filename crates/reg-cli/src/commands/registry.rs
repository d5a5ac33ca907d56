use reg_core::entities::{
    Course, Department, ExtracurricularActivity, Faculty, Program, RegistryRecord,
};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{RecordKind, RegistryCommands};
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar registry`.
pub async fn handle(
    action: &RegistryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RegistryCommands::AddDepartment { id, name } => {
            let record = Department {
                department_id: id.clone(),
                department_name: name.clone(),
            };
            create(record, ctx, flags).await
        }
        RegistryCommands::AddFaculty {
            id,
            name,
            department,
        } => {
            let record = Faculty {
                faculty_id: id.clone(),
                faculty_name: name.clone(),
                department_id: department.clone(),
            };
            create(record, ctx, flags).await
        }
        RegistryCommands::AddProgram {
            name,
            max_semesters,
            required_credits,
            max_credits,
            min_credits,
        } => {
            let record = Program {
                name: name.clone(),
                max_semesters: *max_semesters,
                required_credits: *required_credits,
                max_credits_per_semester: *max_credits,
                min_credits_per_semester: *min_credits,
            };
            create(record, ctx, flags).await
        }
        RegistryCommands::AddCourse {
            id,
            name,
            credits,
            department,
            faculty,
            description,
        } => {
            let record = Course {
                course_id: id.clone(),
                name: name.clone(),
                credits: *credits,
                department_id: department.clone(),
                faculty_id: faculty.clone(),
                description: description.clone(),
            };
            create(record, ctx, flags).await
        }
        RegistryCommands::AddActivity {
            id,
            name,
            max_count,
            faculty,
            description,
            location,
            date,
        } => {
            let record = ExtracurricularActivity {
                activity_id: id.clone(),
                name: name.clone(),
                description: description.clone(),
                location: location.clone(),
                date: date.clone(),
                max_count: *max_count,
                faculty_id: faculty.clone(),
            };
            create(record, ctx, flags).await
        }
        RegistryCommands::Get { kind, id } => match kind {
            RecordKind::Department => get::<Department>(id, ctx, flags).await,
            RecordKind::Faculty => get::<Faculty>(id, ctx, flags).await,
            RecordKind::Program => get::<Program>(id, ctx, flags).await,
            RecordKind::Course => get::<Course>(id, ctx, flags).await,
            RecordKind::Activity => get::<ExtracurricularActivity>(id, ctx, flags).await,
        },
        RegistryCommands::List { kind } => match kind {
            RecordKind::Department => list::<Department>(ctx, flags).await,
            RecordKind::Faculty => list::<Faculty>(ctx, flags).await,
            RecordKind::Program => list::<Program>(ctx, flags).await,
            RecordKind::Course => list::<Course>(ctx, flags).await,
            RecordKind::Activity => list::<ExtracurricularActivity>(ctx, flags).await,
        },
        RegistryCommands::Delete { kind, id } => match kind {
            RecordKind::Department => delete::<Department>(id, ctx, flags).await,
            RecordKind::Faculty => delete::<Faculty>(id, ctx, flags).await,
            RecordKind::Program => delete::<Program>(id, ctx, flags).await,
            RecordKind::Course => delete::<Course>(id, ctx, flags).await,
            RecordKind::Activity => delete::<ExtracurricularActivity>(id, ctx, flags).await,
        },
        RegistryCommands::FacultyCourses { faculty_id } => {
            let courses = ctx.service.courses_by_faculty(faculty_id).await?;
            output(&courses, flags.format)
        }
        RegistryCommands::FacultyActivities { faculty_id } => {
            let activities = ctx.service.activities_by_faculty(faculty_id).await?;
            output(&activities, flags.format)
        }
    }
}

async fn create<R: RegistryRecord>(record: R, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let created = ctx.service.create_record(ctx.caller(), record).await?;
    output(&created, flags.format)
}

async fn get<R: RegistryRecord>(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record: R = ctx.service.get_record(id).await?;
    output(&record, flags.format)
}

async fn list<R: RegistryRecord>(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records: Vec<R> = ctx.service.list_records().await?;
    output(&records, flags.format)
}

async fn delete<R: RegistryRecord>(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let removed: R = ctx.service.delete_record(ctx.caller(), id).await?;
    output(&removed, flags.format)
}
