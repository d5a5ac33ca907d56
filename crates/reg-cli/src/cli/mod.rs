use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat, RoleArg};
pub use root_commands::Commands;

/// Top-level CLI parser for the `registrar` binary.
#[derive(Debug, Parser)]
#[command(
    name = "registrar",
    version,
    about = "Registrar - student enrollment, results and GPA with an audit ledger"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Database path, or :memory: (overrides store.path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Caller identity recorded on audit entries (overrides identity.caller)
    #[arg(long, global = true)]
    pub caller: Option<String>,

    /// Role held by the caller; repeat for several (overrides identity.roles)
    #[arg(long = "role", global = true)]
    pub roles: Vec<RoleArg>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            db: self.db.clone(),
            caller: self.caller.clone(),
            roles: self.roles.iter().copied().map(Into::into).collect(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}
