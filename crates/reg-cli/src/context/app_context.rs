use std::sync::Arc;

use anyhow::Context;
use reg_config::RegistrarConfig;
use reg_db::service::RegistrarService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RegistrarService,
    pub config: RegistrarConfig,
}

impl AppContext {
    /// Open the configured store with the configured operator identity.
    pub async fn init(config: RegistrarConfig) -> anyhow::Result<Self> {
        if let Some(dir) = config.store.parent_dir() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create store directory {}", dir.display()))?;
        }

        let offset = config.ledger.offset()?;
        let roles = Arc::new(config.identity.role_table());
        let service = RegistrarService::new_local(&config.store.path, roles, offset)
            .await
            .with_context(|| format!("failed to open store at {}", config.store.path))?;

        tracing::debug!(path = %config.store.path, caller = %config.identity.caller, "store opened");
        Ok(Self { service, config })
    }

    /// Identity every command acts as.
    #[must_use]
    pub fn caller(&self) -> &str {
        &self.config.identity.caller
    }
}
