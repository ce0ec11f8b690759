//! Mahalanobis-distance upper bound
//!
//! Assuming each class is approximately Gaussian, the Tumer-Ghosh
//! relation converts the squared Mahalanobis distance between the class
//! means (under the prior-weighted pooled covariance) into an upper
//! bound on the Bayes Error Rate:
//!
//! `BER <= 2·p0·p1 / (1 + p0·p1·d²)`
//!
//! The output lies in `[0, 2·p0·p1]` for any invertible or
//! pseudo-invertible pooled covariance.

use crate::traits::DatasetBound;
use ber_core::linalg::{column_means, invert_or_pseudo, quadratic_form, sample_covariance};
use ber_core::{Dataset, Error, Result};
use tracing::{debug, instrument};

/// Mahalanobis-distance BER upper bound estimator
///
/// Covariance inversion is an explicit two-step strategy: the exact
/// inverse is tried first, and a singular pooled covariance (expected
/// when rows are fewer than features, or collinearity survives
/// standardization) falls back to the SVD pseudo-inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct MahalanobisBound;

impl MahalanobisBound {
    /// Create a new Mahalanobis bound estimator
    pub fn new() -> Self {
        Self
    }
}

impl DatasetBound for MahalanobisBound {
    type Output = f64;

    #[instrument(skip(data), fields(n = data.n_samples(), d = data.n_features()))]
    fn bound(&self, data: &Dataset) -> Result<f64> {
        let (p0, p1) = data.priors();
        let (n0, n1) = data.class_counts();
        if n0 < 2 || n1 < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: n0.min(n1),
            });
        }

        let x0 = data.class_rows(0);
        let x1 = data.class_rows(1);
        let mu0 = column_means(&x0);
        let mu1 = column_means(&x1);
        let sigma0 = sample_covariance(&x0)?;
        let sigma1 = sample_covariance(&x1)?;

        let pooled = sigma0 * p0 + sigma1 * p1;
        let pooled_inv = invert_or_pseudo(&pooled, "pooled class covariance")?;

        let diff = mu1 - mu0;
        let d_sq = quadratic_form(&diff, &pooled_inv);
        debug!(p0, p1, d_sq, "Mahalanobis distance computed");

        Ok(2.0 * p0 * p1 / (1.0 + p0 * p1 * d_sq))
    }

    fn name(&self) -> &'static str {
        "Mahalanobis bound"
    }
}
