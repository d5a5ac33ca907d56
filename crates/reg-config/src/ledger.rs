//! Audit log settings.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_utc_offset() -> String {
    "+05:30".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Civil time zone of audit timestamps, as `±HH:MM`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl LedgerConfig {
    /// Parse `utc_offset` into a fixed offset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless the value is `±HH:MM` with
    /// `HH < 24` and `MM < 60`.
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_offset(&self.utc_offset).ok_or_else(|| ConfigError::InvalidValue {
            field: "ledger.utc_offset".into(),
            reason: format!("expected ±HH:MM, got '{}'", self.utc_offset),
        })
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
        }
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    if hours.len() != 2 || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
