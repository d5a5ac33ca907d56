use reg_config::RegistrarConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RegistrarConfig> {
    let mut config = RegistrarConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut RegistrarConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.store.path.clone_from(db);
    }
    if let Some(caller) = &flags.caller {
        config.identity.caller.clone_from(caller);
    }
    if !flags.roles.is_empty() {
        config.identity.roles.clone_from(&flags.roles);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use reg_core::enums::Role;

    use super::*;
    use crate::cli::OutputFormat;

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            db: None,
            caller: None,
            roles: Vec::new(),
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn no_flags_keep_config() {
        let mut config = RegistrarConfig::default();
        apply_overrides(&mut config, &flags());
        assert_eq!(config.store.path, ".registrar/registrar.db");
        assert_eq!(config.identity.roles, vec![Role::Admin, Role::Faculty]);
    }

    #[test]
    fn flags_replace_store_and_identity() {
        let mut config = RegistrarConfig::default();
        let flags = GlobalFlags {
            db: Some(":memory:".into()),
            caller: Some("prof".into()),
            roles: vec![Role::Faculty],
            ..flags()
        };
        apply_overrides(&mut config, &flags);
        assert!(config.store.is_in_memory());
        assert_eq!(config.identity.caller, "prof");
        assert_eq!(config.identity.roles, vec![Role::Faculty]);
    }
}
