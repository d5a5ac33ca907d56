use clap::ValueEnum;

/// Records with a published JSON Schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaEntity {
    Department,
    Faculty,
    Program,
    Course,
    Activity,
    Student,
    Enrollment,
    CourseResult,
    LedgerUpdate,
    GradeUpdate,
    SgpaReport,
}
