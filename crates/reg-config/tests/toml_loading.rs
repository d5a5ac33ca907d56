//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use reg_config::{ConfigError, RegistrarConfig};
use reg_core::enums::Role;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
path = "/var/lib/registrar/records.db"

[ledger]
utc_offset = "+00:00"

[identity]
caller = "registrar-office"
roles = ["admin"]
"#,
        )?;

        let config: RegistrarConfig = Figment::from(Serialized::defaults(RegistrarConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.path, "/var/lib/registrar/records.db");
        assert_eq!(config.ledger.offset().unwrap().local_minus_utc(), 0);
        assert_eq!(config.identity.caller, "registrar-office");
        assert_eq!(config.identity.roles, vec![Role::Admin]);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[store]\npath = \"custom.db\"\n")?;

        let config: RegistrarConfig = Figment::from(Serialized::defaults(RegistrarConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.path, "custom.db");
        assert_eq!(config.ledger.utc_offset, "+05:30");
        assert_eq!(config.identity.roles, vec![Role::Admin, Role::Faculty]);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".registrar")?;
        jail.create_file(
            ".registrar/config.toml",
            "[identity]\ncaller = \"project-operator\"\n",
        )?;

        let config = RegistrarConfig::load().expect("config loads");
        assert_eq!(config.identity.caller, "project-operator");
        Ok(())
    });
}

#[test]
fn invalid_offset_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".registrar")?;
        jail.create_file(".registrar/config.toml", "[ledger]\nutc_offset = \"IST\"\n")?;

        let err = RegistrarConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field, .. } if field == "ledger.utc_offset"));
        Ok(())
    });
}

#[test]
fn unknown_role_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".registrar")?;
        jail.create_file(
            ".registrar/config.toml",
            "[identity]\nroles = [\"dean\"]\n",
        )?;

        let err = RegistrarConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
