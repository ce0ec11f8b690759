//! Bhattacharyya-distance two-sided bound
//!
//! The Bhattacharyya distance measures distributional overlap between
//! the two class-conditional densities and, unlike the Mahalanobis
//! distance, accounts for covariance differences between the classes.
//! It yields both a lower and an upper bound on the Bayes Error Rate:
//!
//! `B = (1/8)·(mu1-mu0)ᵀ·sigma⁻¹·(mu1-mu0)
//!      + (1/2)·logdet(sigma) - (1/4)·(logdet(sigma0) + logdet(sigma1))`
//!
//! with `sigma = (sigma0 + sigma1)/2`, then
//!
//! `lower = (1 - sqrt(1 - 4·p0·p1·e^(-2B)))/2`, `upper = e^(-B)·sqrt(p0·p1)`
//!
//! All determinants are handled as log-magnitudes so high-dimensional or
//! ill-conditioned covariances neither overflow nor underflow.

use crate::traits::DatasetBound;
use crate::types::BoundInterval;
use ber_core::linalg::{
    column_means, column_stds, invert_or_pseudo, log_abs_det, quadratic_form, sample_covariance,
};
use ber_core::{Dataset, Error, Result};
use nalgebra::DMatrix;
use tracing::{debug, instrument};

/// Bhattacharyya-distance BER bound estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct BhattacharyyaBound;

impl BhattacharyyaBound {
    /// Create a new Bhattacharyya bound estimator
    pub fn new() -> Self {
        Self
    }
}

impl DatasetBound for BhattacharyyaBound {
    type Output = BoundInterval;

    #[instrument(skip(data), fields(n = data.n_samples(), d = data.n_features()))]
    fn bound(&self, data: &Dataset) -> Result<BoundInterval> {
        let (p0, p1) = data.priors();
        let (n0, n1) = data.class_counts();
        if n0 < 2 || n1 < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: n0.min(n1),
            });
        }

        // A column that is constant within either class makes that
        // class's covariance singular; drop it from both subsets so the
        // two stay column-aligned.
        let (x0, x1) = drop_classwise_constant_columns(data.class_rows(0), data.class_rows(1))?;

        let mu0 = column_means(&x0);
        let mu1 = column_means(&x1);
        let sigma0 = sample_covariance(&x0)?;
        let sigma1 = sample_covariance(&x1)?;
        let sigma = (&sigma0 + &sigma1) / 2.0;

        let sigma_inv = invert_or_pseudo(&sigma, "averaged class covariance")?;
        let diff = mu1 - mu0;
        let first_term = quadratic_form(&diff, &sigma_inv) / 8.0;
        let second_term = 0.5 * log_abs_det(&sigma, "averaged class covariance")?;
        let third_term = -0.25
            * (log_abs_det(&sigma0, "class 0 covariance")?
                + log_abs_det(&sigma1, "class 1 covariance")?);
        let b_dist = first_term + second_term + third_term;
        debug!(first_term, second_term, third_term, b_dist, "Bhattacharyya distance computed");

        interval_from_distance(b_dist, p0, p1)
    }

    fn name(&self) -> &'static str {
        "Bhattacharyya bound"
    }
}

/// Convert a Bhattacharyya distance and class priors into BER bounds.
///
/// The lower-bound radicand `1 - 4·p0·p1·e^(-2B)` is mathematically
/// non-negative for sample covariances, but a near-zero-error dataset can
/// push it below zero numerically; that is surfaced as
/// [`Error::DegenerateBhattacharyyaBound`] rather than clamped.
fn interval_from_distance(b_dist: f64, p0: f64, p1: f64) -> Result<BoundInterval> {
    let radicand = 1.0 - 4.0 * p0 * p1 * (-2.0 * b_dist).exp();
    if radicand < 0.0 {
        return Err(Error::DegenerateBhattacharyyaBound { radicand });
    }
    let lower = 0.5 * (1.0 - radicand.sqrt());
    let upper = (-b_dist).exp() * (p0 * p1).sqrt();
    Ok(BoundInterval::new(lower, upper))
}

/// Drop columns with zero variance in either class subset, keeping the
/// subsets column-aligned.
fn drop_classwise_constant_columns(
    x0: DMatrix<f64>,
    x1: DMatrix<f64>,
) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    debug_assert_eq!(x0.ncols(), x1.ncols());
    let stds0 = column_stds(&x0);
    let stds1 = column_stds(&x1);
    let keep: Vec<usize> = (0..x0.ncols())
        .filter(|&j| stds0[j] > 0.0 && stds1[j] > 0.0)
        .collect();
    if keep.is_empty() {
        return Err(Error::InvalidInput(
            "no feature column varies within both classes".to_string(),
        ));
    }
    let filter = |x: &DMatrix<f64>| {
        DMatrix::from_fn(x.nrows(), keep.len(), |r, c| x[(r, keep[c])])
    };
    Ok((filter(&x0), filter(&x1)))
}
