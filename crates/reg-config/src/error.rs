//! Errors raised while loading Registrar settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to parse or a value had the wrong type.
    #[error("Failed to load registrar settings: {0}")]
    Figment(#[from] figment::Error),

    /// A value parsed but is out of range, e.g. a bad UTC offset.
    #[error("Setting '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
