use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Seed => commands::seed::handle(ctx, flags).await,
        Commands::Registry { action } => commands::registry::handle(&action, ctx, flags).await,
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Result { action } => commands::result::handle(&action, ctx, flags).await,
        Commands::Gpa { action } => commands::gpa::handle(&action, ctx, flags).await,
        Commands::Ledger { action } => commands::ledger::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
