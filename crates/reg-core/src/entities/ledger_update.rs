use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One audit log entry. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerUpdate {
    pub timestamp: DateTime<FixedOffset>,
    pub entry: String,
    pub updated_by: String,
}
