use clap::Subcommand;

/// Result commands. Result lists are JSON arrays, e.g.
/// `'[{"courseId":"CS101","grade":"A"}]'`.
#[derive(Clone, Debug, Subcommand)]
pub enum ResultCommands {
    /// Record results for the current semester.
    Add { student_id: String, results: String },
    /// Change the grade of an existing result.
    UpdateGrade {
        student_id: String,
        course_id: String,
        grade: String,
    },
    /// Result of one course.
    Course {
        student_id: String,
        course_id: String,
    },
    /// Results of one semester, e.g. `Semester1`.
    Semester { student_id: String, semester: String },
    /// Results of every semester.
    All { student_id: String },
}
