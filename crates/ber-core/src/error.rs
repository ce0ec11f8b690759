//! Error types for Bayes error estimation
//!
//! Provides a unified error type for all ber-stats crates. Every failure
//! mode is a distinct named variant, detected as early as possible; no
//! estimator substitutes a default value for ill-conditioned input.

use thiserror::Error;

/// Core error type for Bayes error estimation
#[derive(Error, Debug)]
pub enum Error {
    /// The label vector contains more than two distinct values
    #[error("BER is defined only for binary classification: found {distinct} distinct label values")]
    UnsupportedLabelCardinality { distinct: usize },

    /// A covariance matrix could not be inverted, even by pseudo-inverse
    #[error("Singular covariance matrix: {0}")]
    SingularCovariance(String),

    /// The Bhattacharyya lower-bound radicand is negative
    #[error("Bhattacharyya lower bound undefined: radicand {radicand} is negative (near-zero-error dataset)")]
    DegenerateBhattacharyyaBound { radicand: f64 },

    /// The mutual-information correlation factor left [0, 1] or reached 1
    #[error("Degenerate ensemble correlation: delta = {delta} (perfectly correlated or inconsistent entropy estimate)")]
    DegenerateEnsembleCorrelation { delta: f64 },

    /// No data point met the plurality confidence threshold
    #[error("No data point reached the plurality-vote confidence threshold")]
    NoConfidentVotes,

    /// Unknown configuration value (e.g., ensemble method name)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a row-count mismatch between two arrays
    pub fn row_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Row count mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidInput(format!("{context} contains NaN or infinite values"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedLabelCardinality { distinct: 3 };
        assert_eq!(
            err.to_string(),
            "BER is defined only for binary classification: found 3 distinct label values"
        );

        let err = Error::SingularCovariance("pooled covariance".to_string());
        assert_eq!(err.to_string(), "Singular covariance matrix: pooled covariance");

        let err = Error::NoConfidentVotes;
        assert_eq!(
            err.to_string(),
            "No data point reached the plurality-vote confidence threshold"
        );

        let err = Error::InvalidConfiguration("unknown method 'median'".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: unknown method 'median'");

        let err = Error::InsufficientData { expected: 2, actual: 1 };
        assert_eq!(
            err.to_string(),
            "Insufficient data: expected at least 2 samples, got 1"
        );
    }

    #[test]
    fn test_degenerate_variants_carry_values() {
        let err = Error::DegenerateEnsembleCorrelation { delta: 1.0 };
        assert!(err.to_string().contains("delta = 1"));

        let err = Error::DegenerateBhattacharyyaBound { radicand: -0.25 };
        assert!(err.to_string().contains("-0.25"));
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::row_mismatch(100, 50, "ensemble predictions");
        assert_eq!(
            err.to_string(),
            "Invalid input: Row count mismatch in ensemble predictions: expected 100, got 50"
        );

        let err = Error::non_finite("feature matrix");
        assert_eq!(
            err.to_string(),
            "Invalid input: feature matrix contains NaN or infinite values"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn try_bound(succeed: bool) -> Result<f64> {
            if succeed {
                Ok(0.25)
            } else {
                Err(Error::NoConfidentVotes)
            }
        }

        assert_eq!(try_bound(true).unwrap(), 0.25);
        assert!(try_bound(false).is_err());
    }
}
