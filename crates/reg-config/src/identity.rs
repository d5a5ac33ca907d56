//! Operator identity used by the CLI.

use reg_core::enums::Role;
use reg_core::identity::StaticRoles;
use serde::{Deserialize, Serialize};

fn default_caller() -> String {
    "admin".to_string()
}

fn default_roles() -> Vec<Role> {
    vec![Role::Admin, Role::Faculty]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Identity string recorded as `updatedBy` on audit entries.
    #[serde(default = "default_caller")]
    pub caller: String,

    /// Roles granted to `caller`.
    #[serde(default = "default_roles")]
    pub roles: Vec<Role>,
}

impl IdentityConfig {
    /// Role table holding just the configured operator.
    #[must_use]
    pub fn role_table(&self) -> StaticRoles {
        StaticRoles::new().grant(self.caller.clone(), self.roles.iter().copied())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            caller: default_caller(),
            roles: default_roles(),
        }
    }
}
