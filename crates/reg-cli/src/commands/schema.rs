use reg_core::entities::{
    Course, CourseResult, Department, Enrollment, ExtracurricularActivity, Faculty, LedgerUpdate,
    Program, Student,
};
use reg_core::responses::{GradeUpdateOutcome, SgpaReport};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::cli::subcommands::SchemaEntity;
use crate::output::output;

/// Handle `registrar schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_of(args.entity), flags.format)
}

fn schema_of(entity: SchemaEntity) -> Schema {
    match entity {
        SchemaEntity::Department => schema_for!(Department),
        SchemaEntity::Faculty => schema_for!(Faculty),
        SchemaEntity::Program => schema_for!(Program),
        SchemaEntity::Course => schema_for!(Course),
        SchemaEntity::Activity => schema_for!(ExtracurricularActivity),
        SchemaEntity::Student => schema_for!(Student),
        SchemaEntity::Enrollment => schema_for!(Enrollment),
        SchemaEntity::CourseResult => schema_for!(CourseResult),
        SchemaEntity::LedgerUpdate => schema_for!(LedgerUpdate),
        SchemaEntity::GradeUpdate => schema_for!(GradeUpdateOutcome),
        SchemaEntity::SgpaReport => schema_for!(SgpaReport),
    }
}
