//! Caller capability checks.
//!
//! The service never talks to an identity provider. It is handed a
//! [`RoleCheck`] and asks it whether a caller holds a role.

use std::collections::{BTreeSet, HashMap};

use crate::enums::Role;
use crate::errors::CoreError;

/// Answers `HasRole(caller, role)`.
pub trait RoleCheck: Send + Sync {
    fn has_role(&self, caller: &str, role: Role) -> bool;
}

/// Fixed caller → roles table.
#[derive(Debug, Clone, Default)]
pub struct StaticRoles {
    grants: HashMap<String, BTreeSet<Role>>,
}

impl StaticRoles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `roles` to `caller`, keeping any roles already granted.
    #[must_use]
    pub fn grant(mut self, caller: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        self.grants.entry(caller.into()).or_default().extend(roles);
        self
    }

    /// Roles held by `caller`, in declaration order.
    #[must_use]
    pub fn roles_of(&self, caller: &str) -> Vec<Role> {
        self.grants
            .get(caller)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl RoleCheck for StaticRoles {
    fn has_role(&self, caller: &str, role: Role) -> bool {
        self.grants
            .get(caller)
            .is_some_and(|roles| roles.contains(&role))
    }
}

/// Require the caller to hold every role in `roles`.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` naming `action` if any role is missing.
pub fn require_all(
    check: &dyn RoleCheck,
    caller: &str,
    roles: &[Role],
    action: &str,
) -> Result<(), CoreError> {
    if roles.iter().all(|role| check.has_role(caller, *role)) {
        return Ok(());
    }
    Err(CoreError::Unauthorized {
        caller: caller.to_string(),
        action: format!("{action} (requires {})", join_roles(roles, " and ")),
    })
}

/// Require the caller to hold at least one role in `roles`.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` naming `action` if no role is held.
pub fn require_any(
    check: &dyn RoleCheck,
    caller: &str,
    roles: &[Role],
    action: &str,
) -> Result<(), CoreError> {
    if roles.iter().any(|role| check.has_role(caller, *role)) {
        return Ok(());
    }
    Err(CoreError::Unauthorized {
        caller: caller.to_string(),
        action: format!("{action} (requires {})", join_roles(roles, " or ")),
    })
}

fn join_roles(roles: &[Role], sep: &str) -> String {
    roles
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> StaticRoles {
        StaticRoles::new()
            .grant("registrar", [Role::Admin, Role::Faculty])
            .grant("prof", [Role::Faculty])
            .grant("alice", [Role::Student])
    }

    #[test]
    fn grants_accumulate() {
        let roles = StaticRoles::new()
            .grant("x", [Role::Admin])
            .grant("x", [Role::Faculty]);
        assert_eq!(roles.roles_of("x"), vec![Role::Admin, Role::Faculty]);
        assert!(roles.roles_of("nobody").is_empty());
    }

    #[test]
    fn require_all_needs_every_role() {
        let roles = roles();
        let both = [Role::Admin, Role::Faculty];
        assert!(require_all(&roles, "registrar", &both, "add courses").is_ok());

        let err = require_all(&roles, "prof", &both, "add courses").unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized { .. }));
        assert!(err.to_string().contains("admin and faculty"));
    }

    #[test]
    fn require_any_needs_one_role() {
        let roles = roles();
        let either = [Role::Admin, Role::Faculty];
        assert!(require_any(&roles, "prof", &either, "add results").is_ok());
        assert!(require_any(&roles, "alice", &either, "add results").is_err());
        assert!(require_any(&roles, "stranger", &either, "add results").is_err());
    }
}
