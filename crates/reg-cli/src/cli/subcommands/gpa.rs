use clap::Subcommand;

/// GPA commands.
#[derive(Clone, Debug, Subcommand)]
pub enum GpaCommands {
    /// SGPA of every graded semester, or of one with `--semester`.
    Sgpa {
        student_id: String,
        #[arg(long)]
        semester: Option<String>,
    },
    /// Cumulative GPA.
    Cgpa { student_id: String },
    /// Show the cached SGPA values, or drop them with `--clear`.
    Cache {
        student_id: String,
        #[arg(long)]
        clear: bool,
    },
}
