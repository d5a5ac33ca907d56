//! Audit log repository.
//!
//! Append-only sequence of `LedgerUpdate` entries over the key-value store.
//! `LEDGERUPDATE_COUNT` holds the length `n`; entry `i` lives under
//! `LEDGERUPDATE-<i>`. Appends go through the caller's `Txn`, so an entry
//! commits or vanishes together with the change it documents, and two
//! concurrent appends conflict on the counter key.

use std::path::Path;

use chrono::Utc;
use reg_core::entities::LedgerUpdate;
use reg_core::enums::EntityKind;
use reg_core::errors::CoreError;
use reg_core::keys::{LEDGER_UPDATE_COUNT, ledger_update_key};
use reg_core::responses::{IndexedLedgerUpdate, LedgerExportSummary};
use tracing::info;

use crate::error::DatabaseError;
use crate::helpers::parse_counter;
use crate::service::RegistrarService;
use crate::txn::Txn;

async fn ledger_len(txn: &mut Txn<'_>) -> Result<u64, DatabaseError> {
    match txn.get(LEDGER_UPDATE_COUNT).await? {
        Some(raw) => parse_counter(LEDGER_UPDATE_COUNT, &raw),
        None => Ok(0),
    }
}

async fn read_entry(txn: &mut Txn<'_>, index: u64) -> Result<LedgerUpdate, DatabaseError> {
    let key = ledger_update_key(index);
    txn.get_json(&key).await?.ok_or_else(|| {
        DatabaseError::InvalidState(format!("audit log is missing entry {index} below its length"))
    })
}

impl RegistrarService {
    /// Append one audit entry inside `txn`. Returns its index.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the counter cannot be read or is corrupt.
    pub async fn append_ledger(
        &self,
        txn: &mut Txn<'_>,
        caller: &str,
        entry: impl Into<String>,
    ) -> Result<u64, DatabaseError> {
        let index = ledger_len(txn).await?;
        let update = LedgerUpdate {
            timestamp: Utc::now().with_timezone(&self.offset()),
            entry: entry.into(),
            updated_by: caller.to_string(),
        };
        txn.put_json(ledger_update_key(index), &update)?;
        txn.put(LEDGER_UPDATE_COUNT, (index + 1).to_string());
        Ok(index)
    }

    /// Number of committed audit entries.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the counter cannot be read or is corrupt.
    pub async fn ledger_len(&self) -> Result<u64, DatabaseError> {
        let mut txn = self.db().begin();
        ledger_len(&mut txn).await
    }

    /// Every audit entry in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the counter or an entry is missing or corrupt.
    pub async fn get_all_ledger_updates(&self) -> Result<Vec<LedgerUpdate>, DatabaseError> {
        let mut txn = self.db().begin();
        let len = ledger_len(&mut txn).await?;
        let mut updates = Vec::new();
        for index in 0..len {
            updates.push(read_entry(&mut txn, index).await?);
        }
        Ok(updates)
    }

    /// One audit entry by zero-based index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an index past the end of the log.
    pub async fn get_ledger_update(&self, index: u64) -> Result<IndexedLedgerUpdate, DatabaseError> {
        let mut txn = self.db().begin();
        if index >= ledger_len(&mut txn).await? {
            return Err(CoreError::not_found(EntityKind::LedgerUpdate, index.to_string()).into());
        }
        let update = read_entry(&mut txn, index).await?;
        Ok(IndexedLedgerUpdate { index, update })
    }

    /// Write every audit entry, in order, to `path` as JSON Lines.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if reading the log or writing the file fails.
    pub async fn export_ledger(&self, path: &Path) -> Result<LedgerExportSummary, DatabaseError> {
        let updates = self.get_all_ledger_updates().await?;
        let lines: Vec<IndexedLedgerUpdate> = (0u64..)
            .zip(updates)
            .map(|(index, update)| IndexedLedgerUpdate { index, update })
            .collect();
        serde_jsonlines::write_json_lines(path, &lines).map_err(|e| DatabaseError::Other(e.into()))?;
        info!(path = %path.display(), entries = lines.len(), "exported audit log");
        Ok(LedgerExportSummary {
            path: path.display().to_string(),
            entries: lines.len() as u64,
        })
    }
}
