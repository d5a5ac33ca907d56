//! Service layer orchestrating store reads and writes with the audit log.
//!
//! `RegistrarService` wraps `RegistrarDb` (raw store access), the injected
//! role check, the audit timestamp offset, and the SGPA cache. All
//! operations are implemented as `impl RegistrarService` blocks in
//! [`crate::repos`].

use std::sync::Arc;

use chrono::FixedOffset;
use reg_core::enums::Role;
use reg_core::errors::CoreError;
use reg_core::identity::{RoleCheck, require_all, require_any};

use crate::RegistrarDb;
use crate::error::DatabaseError;
use crate::sgpa_cache::SgpaCache;

/// Orchestrates every Registrar operation.
///
/// Every mutation follows this protocol:
/// 1. Check the caller's roles
/// 2. Begin a `Txn` and read current state through it
/// 3. Validate and apply the change in memory
/// 4. Buffer the new state and append one audit entry to the same `Txn`
/// 5. Commit
pub struct RegistrarService {
    db: RegistrarDb,
    roles: Arc<dyn RoleCheck>,
    offset: FixedOffset,
    sgpa: SgpaCache,
}

impl RegistrarService {
    /// Create a new service over a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        roles: Arc<dyn RoleCheck>,
        offset: FixedOffset,
    ) -> Result<Self, DatabaseError> {
        let db = RegistrarDb::open_local(db_path).await?;
        Ok(Self::from_db(db, roles, offset))
    }

    /// Create from an existing `RegistrarDb`.
    #[must_use]
    pub fn from_db(db: RegistrarDb, roles: Arc<dyn RoleCheck>, offset: FixedOffset) -> Self {
        Self {
            db,
            roles,
            offset,
            sgpa: SgpaCache::new(),
        }
    }

    #[must_use]
    pub const fn db(&self) -> &RegistrarDb {
        &self.db
    }

    /// Civil offset audit timestamps are written in.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    #[must_use]
    pub const fn sgpa_cache(&self) -> &SgpaCache {
        &self.sgpa
    }

    pub(crate) fn require_all_roles(
        &self,
        caller: &str,
        roles: &[Role],
        action: &str,
    ) -> Result<(), DatabaseError> {
        require_all(self.roles.as_ref(), caller, roles, action).map_err(DatabaseError::from)
    }

    pub(crate) fn require_any_role(
        &self,
        caller: &str,
        roles: &[Role],
        action: &str,
    ) -> Result<(), DatabaseError> {
        require_any(self.roles.as_ref(), caller, roles, action).map_err(DatabaseError::from)
    }
}

/// Reject blank identifiers before they turn into store keys.
pub(crate) fn require_id(name: &str, value: &str) -> Result<(), DatabaseError> {
    if value.trim().is_empty() {
        return Err(CoreError::malformed(format!("{name} must not be empty")).into());
    }
    Ok(())
}
