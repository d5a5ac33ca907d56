//! JSON value encoding for store records.
//!
//! Every record is a JSON document in the `value` column. These helpers
//! isolate the (de)serialization and map failures to `DatabaseError`.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DatabaseError;

/// Decode the JSON stored under `key`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored text is not valid
/// JSON for `T`.
pub fn parse_json<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw)
        .map_err(|e| DatabaseError::InvalidState(format!("Corrupt value under '{key}': {e}")))
}

/// Encode a record for storage.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Other(e.into()))
}

/// Parse a decimal counter value.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if `raw` is not a non-negative integer.
pub fn parse_counter(key: &str, raw: &str) -> Result<u64, DatabaseError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| DatabaseError::InvalidState(format!("Counter '{key}' holds '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_json_is_invalid_state() {
        let err = parse_json::<Vec<String>>("ENROLLMENT-S1", "{oops").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidState(_)));
        assert!(err.to_string().contains("ENROLLMENT-S1"));
    }

    #[test]
    fn counters_parse_decimal() {
        assert_eq!(parse_counter("C", "42").unwrap(), 42);
        assert!(parse_counter("C", "-1").is_err());
        assert!(parse_counter("C", "four").is_err());
    }
}
