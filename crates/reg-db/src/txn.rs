//! Unit of work over the key-value table.
//!
//! A [`Txn`] reads through to the store, remembering the version of every
//! key it observed (`0` for an absent key), and buffers all writes in
//! memory. [`Txn::commit`] opens one libSQL transaction, re-checks every
//! observed version, and only then applies the buffered writes. A changed
//! version aborts with [`DatabaseError::Conflict`] and nothing is written.
//! Dropping a `Txn` without committing discards its writes.
//!
//! Key enumeration through [`Txn::scan_prefix`] records the versions of
//! the keys it returned; keys created under the prefix by a concurrent
//! commit are not detected.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::RegistrarDb;
use crate::error::DatabaseError;
use crate::helpers::{parse_json, to_json};

/// Buffered single-key write; `None` deletes.
type PendingWrite = Option<String>;

pub struct Txn<'a> {
    db: &'a RegistrarDb,
    observed: HashMap<String, i64>,
    writes: BTreeMap<String, PendingWrite>,
}

impl<'a> Txn<'a> {
    pub(crate) fn new(db: &'a RegistrarDb) -> Self {
        Self {
            db,
            observed: HashMap::new(),
            writes: BTreeMap::new(),
        }
    }

    /// Read `key`, seeing this transaction's own pending writes first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get(&mut self, key: &str) -> Result<Option<String>, DatabaseError> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        let mut rows = self
            .db
            .conn()
            .query("SELECT value, version FROM kv_store WHERE key = ?1", [key])
            .await?;
        let (value, version) = match rows.next().await? {
            Some(row) => (row.get::<Option<String>>(0)?, row.get::<i64>(1)?),
            None => (None, 0),
        };
        self.observed.entry(key.to_string()).or_insert(version);
        Ok(value)
    }

    /// Read and decode the JSON record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the value is corrupt.
    pub async fn get_json<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Option<T>, DatabaseError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(parse_json(key, &raw)?)),
            None => Ok(None),
        }
    }

    /// Whether a live value exists under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn exists(&mut self, key: &str) -> Result<bool, DatabaseError> {
        Ok(self.get(key).await?.is_some())
    }

    /// All live `(key, value)` pairs whose key starts with `prefix`, in key
    /// order, merged with this transaction's pending writes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn scan_prefix(
        &mut self,
        prefix: &str,
    ) -> Result<Vec<(String, String)>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT key, value, version FROM kv_store
                 WHERE substr(key, 1, length(?1)) = ?1 AND value IS NOT NULL
                 ORDER BY key",
                [prefix],
            )
            .await?;

        let mut found = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            let key = row.get::<String>(0)?;
            let value = row.get::<String>(1)?;
            let version = row.get::<i64>(2)?;
            self.observed.entry(key.clone()).or_insert(version);
            found.insert(key, value);
        }

        for (key, pending) in self.writes.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            match pending {
                Some(value) => found.insert(key.clone(), value.clone()),
                None => found.remove(key),
            };
        }
        Ok(found.into_iter().collect())
    }

    /// Decode every live record under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a value is corrupt.
    pub async fn scan_json<T: DeserializeOwned>(
        &mut self,
        prefix: &str,
    ) -> Result<Vec<T>, DatabaseError> {
        self.scan_prefix(prefix)
            .await?
            .iter()
            .map(|(key, raw)| parse_json(key, raw))
            .collect()
    }

    /// Version of `key` as first observed by this transaction, if read.
    #[must_use]
    pub fn observed_version(&self, key: &str) -> Option<i64> {
        self.observed.get(key).copied()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.writes.insert(key.into(), Some(value.into()));
    }

    /// Buffer a JSON-encoded record under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if serialization fails.
    pub fn put_json<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), DatabaseError> {
        let raw = to_json(value)?;
        self.put(key, raw);
        Ok(())
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), None);
    }

    /// Number of buffered writes.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Validate observed versions and apply all buffered writes atomically.
    ///
    /// A transaction without writes commits trivially.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if any observed key changed since it
    /// was read, or `DatabaseError` if the store fails. Either way nothing
    /// from this transaction is written.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        if self.writes.is_empty() {
            return Ok(());
        }

        let _guard = self.db.commit_lock.lock().await;
        let tx = self.db.conn().transaction().await?;

        for (key, expected) in &self.observed {
            let mut rows = tx
                .query("SELECT version FROM kv_store WHERE key = ?1", [key.as_str()])
                .await?;
            let current = match rows.next().await? {
                Some(row) => row.get::<i64>(0)?,
                None => 0,
            };
            if current != *expected {
                warn!(key = %key, expected, current, "commit conflict");
                tx.rollback().await?;
                return Err(DatabaseError::Conflict { key: key.clone() });
            }
        }

        for (key, pending) in &self.writes {
            match pending {
                Some(value) => {
                    tx.execute(
                        "INSERT INTO kv_store (key, value, version) VALUES (?1, ?2, 1)
                         ON CONFLICT(key) DO UPDATE
                         SET value = excluded.value, version = kv_store.version + 1",
                        libsql::params![key.as_str(), value.as_str()],
                    )
                    .await?;
                }
                None => {
                    tx.execute(
                        "UPDATE kv_store SET value = NULL, version = version + 1
                         WHERE key = ?1 AND value IS NOT NULL",
                        [key.as_str()],
                    )
                    .await?;
                }
            }
        }

        tx.commit().await?;
        debug!(writes = self.writes.len(), reads = self.observed.len(), "committed");
        Ok(())
    }
}
