//! Persistent store location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// In-memory database path accepted by the store.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    ".registrar/registrar.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Directory that must exist before the database file can be created.
    #[must_use]
    pub fn parent_dir(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        PathBuf::from(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert_eq!(config.path, ".registrar/registrar.db");
        assert!(!config.is_in_memory());
        assert_eq!(config.parent_dir(), Some(PathBuf::from(".registrar")));
    }

    #[test]
    fn memory_store_has_no_parent() {
        let config = StoreConfig {
            path: IN_MEMORY.into(),
        };
        assert!(config.is_in_memory());
        assert_eq!(config.parent_dir(), None);
    }

    #[test]
    fn bare_file_name_has_no_parent() {
        let config = StoreConfig {
            path: "registrar.db".into(),
        };
        assert_eq!(config.parent_dir(), None);
    }
}
