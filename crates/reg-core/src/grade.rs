//! Letter grades and their grade points.
//!
//! Grades are stored exactly as recorded. Lookup into the point table is
//! case-insensitive; anything outside the table is worth zero points.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Grade-point table.
pub const GRADE_POINTS: [(&str, f64); 7] = [
    ("S", 10.0),
    ("A", 9.0),
    ("B", 8.0),
    ("C", 7.0),
    ("D", 6.0),
    ("E", 4.0),
    ("F", 0.0),
];

/// The one grade that earns no credits.
pub const FAILING_GRADE: &str = "F";

/// A recorded letter grade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Grade(String);

impl Grade {
    pub fn new(grade: impl Into<String>) -> Self {
        Self(grade.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Grade points for this grade; unrecognized grades score zero.
    #[must_use]
    pub fn points(&self) -> f64 {
        let normalized = self.0.trim().to_ascii_uppercase();
        GRADE_POINTS
            .iter()
            .find(|(letter, _)| *letter == normalized)
            .map_or(0.0, |(_, points)| *points)
    }

    /// Whether this grade forfeits the course credits.
    #[must_use]
    pub fn is_failing(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(FAILING_GRADE)
    }

    /// Whether this grade appears in the point table.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        let normalized = self.0.trim().to_ascii_uppercase();
        GRADE_POINTS.iter().any(|(letter, _)| *letter == normalized)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Grade {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Grade {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("S", 10.0)]
    #[case("A", 9.0)]
    #[case("B", 8.0)]
    #[case("C", 7.0)]
    #[case("D", 6.0)]
    #[case("E", 4.0)]
    #[case("F", 0.0)]
    #[case("a", 9.0)]
    #[case("X", 0.0)]
    #[case("", 0.0)]
    #[case("A+", 0.0)]
    fn points_follow_table(#[case] grade: &str, #[case] expected: f64) {
        assert!((Grade::new(grade).points() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn unrecognized_grade_is_kept_verbatim() {
        let grade = Grade::new("Incomplete");
        assert_eq!(grade.as_str(), "Incomplete");
        assert!(!grade.is_recognized());
        assert!(!grade.is_failing());
        assert_eq!(serde_json::to_string(&grade).unwrap(), "\"Incomplete\"");
    }

    #[test]
    fn only_f_is_failing() {
        assert!(Grade::new("F").is_failing());
        assert!(Grade::new("f").is_failing());
        assert!(!Grade::new("E").is_failing());
    }
}
