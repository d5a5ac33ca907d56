use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `registrar seed`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = ctx.service.seed_registry(ctx.caller()).await?;
    output(&summary, flags.format)
}
