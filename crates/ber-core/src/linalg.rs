//! Matrix numerics for the parametric bounds
//!
//! Small, numerically careful helpers on `nalgebra` dynamic matrices:
//! per-column statistics, sample covariance, inversion with a
//! pseudo-inverse fallback, and log-abs-determinants via SVD. The
//! determinant of a high-dimensional or ill-conditioned covariance
//! matrix over- or underflows easily, so the bounds work in log space
//! throughout.

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Relative tolerance for singular-value truncation in the pseudo-inverse.
pub const PINV_EPS: f64 = 1e-12;

/// Mean of each column (rows are observations).
pub fn column_means(x: &DMatrix<f64>) -> DVector<f64> {
    let n = x.nrows() as f64;
    DVector::from_fn(x.ncols(), |j, _| x.column(j).iter().sum::<f64>() / n)
}

/// Population standard deviation of each column (denominator `n`).
///
/// This matches the convention used for constant-column detection and
/// feature standardization; the class-conditional covariances use the
/// `n - 1` denominator instead.
pub fn column_stds(x: &DMatrix<f64>) -> DVector<f64> {
    let n = x.nrows() as f64;
    let means = column_means(x);
    DVector::from_fn(x.ncols(), |j, _| {
        let ss: f64 = x.column(j).iter().map(|v| (v - means[j]).powi(2)).sum();
        (ss / n).sqrt()
    })
}

/// Sample covariance matrix of `x` (rows are observations, denominator `n - 1`).
pub fn sample_covariance(x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let n = x.nrows();
    if n < 2 {
        return Err(Error::InsufficientData { expected: 2, actual: n });
    }
    let means = column_means(x);
    let mut centered = x.clone();
    for j in 0..x.ncols() {
        let mut col = centered.column_mut(j);
        col.add_scalar_mut(-means[j]);
    }
    Ok(centered.transpose() * &centered / (n as f64 - 1.0))
}

/// Invert a square matrix, falling back to the SVD pseudo-inverse.
///
/// The exact inverse is preferred; singularity is expected when there are
/// fewer rows than columns or strong collinearity survives
/// standardization, and the pseudo-inverse handles those cases. Only if
/// both fail does this surface [`Error::SingularCovariance`].
pub fn invert_or_pseudo(m: &DMatrix<f64>, context: &str) -> Result<DMatrix<f64>> {
    if let Some(inv) = m.clone().try_inverse() {
        if inv.iter().all(|v| v.is_finite()) {
            return Ok(inv);
        }
    }
    m.clone()
        .pseudo_inverse(PINV_EPS)
        .map_err(|e| Error::SingularCovariance(format!("{context}: {e}")))
}

/// Log of the absolute determinant, computed as the sum of log singular
/// values.
///
/// Fails with [`Error::SingularCovariance`] when the matrix is
/// numerically singular (a zero singular value would drive the log to
/// negative infinity and poison every downstream exponential).
pub fn log_abs_det(m: &DMatrix<f64>, context: &str) -> Result<f64> {
    let svd = m.clone().svd(false, false);
    let mut acc = 0.0;
    for &s in svd.singular_values.iter() {
        if s <= 0.0 || !s.is_finite() {
            return Err(Error::SingularCovariance(format!(
                "{context}: zero singular value in log-determinant"
            )));
        }
        acc += s.ln();
    }
    Ok(acc)
}

/// Quadratic form `vᵀ · m · v`.
pub fn quadratic_form(v: &DVector<f64>, m: &DMatrix<f64>) -> f64 {
    (m * v).dot(v)
}
