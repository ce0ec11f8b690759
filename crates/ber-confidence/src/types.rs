//! Common types for bootstrap intervals

use std::fmt;

/// A two-sided bootstrap confidence interval on a BER estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapInterval {
    /// Low percentile of the bootstrap distribution (5th of 100)
    pub lower: f64,
    /// High percentile of the bootstrap distribution (95th of 100)
    pub upper: f64,
}

impl BootstrapInterval {
    /// Create a new bootstrap interval
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

impl fmt::Display for BootstrapInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "90% CI: [{:.4}, {:.4}]", self.lower, self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_interval_accessors() {
        let ci = BootstrapInterval::new(0.1, 0.3);
        assert_relative_eq!(ci.width(), 0.2);
        assert!(ci.contains(0.2));
        assert!(!ci.contains(0.4));
        assert_eq!(ci.to_string(), "90% CI: [0.1000, 0.3000]");
    }
}
