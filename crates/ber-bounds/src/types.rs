//! Common result types for bound estimators

use std::fmt;

/// A `(lower, upper)` pair of BER bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundInterval {
    /// Lower bound on the Bayes Error Rate
    pub lower: f64,
    /// Upper bound on the Bayes Error Rate
    pub upper: f64,
}

impl BoundInterval {
    /// Create a new bound interval
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl fmt::Display for BoundInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BER in [{:.4}, {:.4}]", self.lower, self.upper)
    }
}
