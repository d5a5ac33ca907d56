//! Decoding of JSON-encoded operation arguments.
//!
//! List arguments reach the service as JSON text (`["CS101","MA101"]`,
//! `[{"courseId":"CS101","grade":"A"}]`). Any decoding failure is a
//! `Malformed` error naming the argument.

use serde::de::DeserializeOwned;

use crate::errors::CoreError;

/// Decode the JSON text of argument `name`.
///
/// # Errors
///
/// Returns `CoreError::Malformed` if `raw` is not valid JSON for `T`.
pub fn decode_json_arg<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::malformed(format!("argument '{name}' is not valid: {e}")))
}
