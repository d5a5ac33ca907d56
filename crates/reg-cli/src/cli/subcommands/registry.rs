use clap::{Subcommand, ValueEnum};

/// Registry record families addressable by `get`, `list` and `delete`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RecordKind {
    Department,
    Faculty,
    Program,
    Course,
    Activity,
}

/// Registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RegistryCommands {
    /// Create a department.
    AddDepartment {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Create a faculty member.
    AddFaculty {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
    },
    /// Create a program.
    AddProgram {
        #[arg(long)]
        name: String,
        #[arg(long)]
        max_semesters: u32,
        #[arg(long)]
        required_credits: u32,
        #[arg(long)]
        max_credits: u32,
        #[arg(long)]
        min_credits: u32,
    },
    /// Create a course.
    AddCourse {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u32,
        #[arg(long)]
        department: String,
        #[arg(long)]
        faculty: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Create an extracurricular activity.
    AddActivity {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        max_count: u32,
        #[arg(long)]
        faculty: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Get a record by ID.
    Get { kind: RecordKind, id: String },
    /// List every record of a kind.
    List { kind: RecordKind },
    /// Delete a record.
    Delete { kind: RecordKind, id: String },
    /// Courses taught by a faculty member.
    FacultyCourses { faculty_id: String },
    /// Activities run by a faculty member.
    FacultyActivities { faculty_id: String },
}
