//! Score value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalized score between 0 and 100 inclusive, always an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// The minimum score.
    pub const ZERO: Self = Self(0);

    /// The maximum score.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range("score", 0, 100, i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Normalizes an achieved/maximum point pair to a 0-100 score.
    ///
    /// Rounds to the nearest integer and clamps at 100. A maximum of zero
    /// yields a score of zero, so weight tables without any weighted
    /// question cannot divide by zero.
    pub fn from_ratio(achieved: u32, maximum: u32) -> Self {
        if maximum == 0 {
            return Self::ZERO;
        }
        let scaled = (f64::from(achieved) / f64::from(maximum)) * 100.0;
        Self((scaled.round() as u32).min(100) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
