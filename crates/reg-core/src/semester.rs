//! Semester labels.
//!
//! A semester is identified by the label `Semester<N>` with `N >= 1`. The
//! label is what gets persisted; ordering is always by `N`, never by the
//! label string (`Semester10` sorts after `Semester9`).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const LABEL_PREFIX: &str = "Semester";

/// An ordinal academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semester(u32);

impl Semester {
    /// The semester every student starts in.
    pub const FIRST: Self = Self(1);

    /// Build a semester from its ordinal.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Malformed` if `number` is zero.
    pub fn new(number: u32) -> Result<Self, CoreError> {
        if number == 0 {
            return Err(CoreError::malformed("semester number must be at least 1"));
        }
        Ok(Self(number))
    }

    /// Parse a `Semester<N>` label.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Malformed` if the label does not have the
    /// `Semester<N>` shape or `N` is zero.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let digits = label
            .strip_prefix(LABEL_PREFIX)
            .filter(|rest| {
                !rest.is_empty()
                    && !rest.starts_with('0')
                    && rest.bytes().all(|b| b.is_ascii_digit())
            })
            .ok_or_else(|| CoreError::malformed(format!("invalid semester label '{label}'")))?;
        let number = digits
            .parse::<u32>()
            .map_err(|e| CoreError::malformed(format!("invalid semester label '{label}': {e}")))?;
        Self::new(number)
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// The semester directly after this one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvariantViolation` on ordinal overflow.
    pub fn next(self) -> Result<Self, CoreError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| CoreError::invariant(format!("no semester after {self}")))
    }

    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LABEL_PREFIX}{}", self.0)
    }
}

impl FromStr for Semester {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Semester {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Semester> for String {
    fn from(value: Semester) -> Self {
        value.to_string()
    }
}

impl JsonSchema for Semester {
    fn schema_name() -> Cow<'static, str> {
        "Semester".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": "^Semester[1-9][0-9]*$"
        })
    }
}
