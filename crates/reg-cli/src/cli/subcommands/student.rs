use clap::Subcommand;

/// Student commands. Course lists are JSON arrays, e.g. `'["CS101"]'`.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Enroll a new student in the first semester.
    Enroll {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        program: String,
        #[arg(long)]
        department: String,
    },
    /// Get a student summary.
    Get { student_id: String },
    /// Get the full enrollment record.
    Enrollment { student_id: String },
    /// List students.
    List,
    /// Add courses to the current semester.
    AddCourses { student_id: String, courses: String },
    /// Drop ungraded courses from the current semester.
    DropCourses { student_id: String, courses: String },
    /// Advance to the next semester.
    NextSemester { student_id: String },
    /// Join an extracurricular activity.
    JoinActivity {
        student_id: String,
        activity_id: String,
    },
    /// Issue or replace an activity certificate.
    AddCertificate {
        student_id: String,
        activity_id: String,
        key: String,
    },
    /// Get the certificate held for an activity.
    Certificate {
        student_id: String,
        activity_id: String,
    },
    /// Students who have taken a course.
    TakingCourse { course_id: String },
    /// Students who joined an activity.
    ActivityMembers { activity_id: String },
}
