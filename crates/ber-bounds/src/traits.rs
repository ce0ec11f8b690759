//! Estimator traits
//!
//! Two seams, matching the two input contracts: bounds derived from the
//! stored dataset, and bounds derived from caller-supplied ensemble
//! predictions. The bootstrap wrapper in `ber-confidence` treats any
//! [`EnsembleBound`] as a black-box callable.

use ber_core::{Dataset, Result};
use nalgebra::DMatrix;

/// A BER bound computed from the stored dataset.
///
/// Implementations re-derive whatever per-class statistics they need
/// (means, covariances, counts) from the dataset on every call; they
/// hold no state of their own beyond configuration.
pub trait DatasetBound {
    /// A single scalar bound or a `(lower, upper)` interval.
    type Output;

    /// Compute the bound.
    fn bound(&self, data: &Dataset) -> Result<Self::Output>;

    /// Estimator name for diagnostics.
    fn name(&self) -> &'static str;
}

/// A BER estimate computed from an ensemble's individual predictions.
///
/// `predictions` is `M × E`: one row per data point, one column per
/// classifier, each entry a probability or a 0/1 prediction. `labels`
/// are the 0/1 ground-truth labels for the same `M` rows (the bootstrap
/// wrapper passes resampled labels here).
pub trait EnsembleBound {
    /// Compute the estimate.
    fn estimate(&self, predictions: &DMatrix<f64>, labels: &[u8]) -> Result<f64>;

    /// Estimator name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Shared validation for ensemble prediction matrices.
pub(crate) fn check_predictions(predictions: &DMatrix<f64>, labels: &[u8]) -> Result<()> {
    use ber_core::Error;

    if predictions.nrows() == 0 {
        return Err(Error::InsufficientData { expected: 1, actual: 0 });
    }
    if labels.len() != predictions.nrows() {
        return Err(Error::row_mismatch(
            predictions.nrows(),
            labels.len(),
            "ensemble predictions",
        ));
    }
    if predictions.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("ensemble predictions"));
    }
    Ok(())
}
