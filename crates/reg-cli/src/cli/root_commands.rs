use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    GpaCommands, LedgerCommands, RegistryCommands, ResultCommands, SchemaEntity, StudentCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Load the demo departments, faculties, courses and programs.
    Seed,
    /// Departments, faculties, programs, courses and activities.
    Registry {
        #[command(subcommand)]
        action: RegistryCommands,
    },
    /// Student enrollment and semester progression.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Course results and grades.
    Result {
        #[command(subcommand)]
        action: ResultCommands,
    },
    /// SGPA and CGPA.
    Gpa {
        #[command(subcommand)]
        action: GpaCommands,
    },
    /// Audit ledger.
    Ledger {
        #[command(subcommand)]
        action: LedgerCommands,
    },
    /// Print the JSON Schema of a record.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub entity: SchemaEntity,
}
