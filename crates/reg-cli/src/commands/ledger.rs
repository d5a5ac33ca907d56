use std::path::Path;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LedgerCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar ledger`.
pub async fn handle(
    action: &LedgerCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LedgerCommands::List => output(&ctx.service.get_all_ledger_updates().await?, flags.format),
        LedgerCommands::Get { index } => {
            output(&ctx.service.get_ledger_update(*index).await?, flags.format)
        }
        LedgerCommands::Export { path } => {
            let summary = ctx.service.export_ledger(Path::new(path)).await?;
            output(&summary, flags.format)
        }
    }
}
