//! Credit-weighted grade-point averages.
//!
//! SGPA and CGPA are the same ratio over different result sets:
//! `Σ(points × credits) / Σ credits`, rounded to two decimal places.
//! CGPA is one cumulative ratio, never an average of SGPAs.

use crate::grade::Grade;

/// Running sums for one GPA computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpaAccumulator {
    weighted_points: f64,
    credits: u32,
}

impl GpaAccumulator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weighted_points: 0.0,
            credits: 0,
        }
    }

    /// Fold one graded course into the sums.
    pub fn add(&mut self, grade: &Grade, credits: u32) {
        self.weighted_points += grade.points() * f64::from(credits);
        self.credits = self.credits.saturating_add(credits);
    }

    #[must_use]
    pub const fn credits(&self) -> u32 {
        self.credits
    }

    #[must_use]
    pub const fn weighted_points(&self) -> f64 {
        self.weighted_points
    }

    /// The rounded average, or `0.0` when no credits were accumulated.
    #[must_use]
    pub fn average(&self) -> f64 {
        if self.credits == 0 {
            return 0.0;
        }
        round_two_places(self.weighted_points / f64::from(self.credits))
    }
}

/// Round through the two-place decimal representation.
#[must_use]
pub fn round_two_places(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
