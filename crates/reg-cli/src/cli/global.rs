use clap::ValueEnum;
use reg_core::enums::Role;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Role names accepted by `--role`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum RoleArg {
    Admin,
    Faculty,
    Student,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Self::Admin,
            RoleArg::Faculty => Self::Faculty,
            RoleArg::Student => Self::Student,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub db: Option<String>,
    pub caller: Option<String>,
    pub roles: Vec<Role>,
    pub quiet: bool,
    pub verbose: bool,
}
