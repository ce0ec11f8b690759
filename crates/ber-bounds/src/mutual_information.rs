//! Mutual-information ensemble bound
//!
//! Tumer-Ghosh estimate of the Bayes Error Rate from an ensemble of
//! classifiers, using the mutual-information-based correlation among
//! their predictions. Needs no access to raw features: the only inputs
//! are the `M × E` individual prediction matrix and the ground-truth
//! labels.
//!
//! With `N` classifiers, mean individual error `e`, ensemble error `E`
//! and normalized correlation `delta`:
//!
//! `BER = (N·E - ((N-1)·delta + 1)·e) / ((N-1)·(1 - delta))`
//!
//! `delta` is the average mutual information between each classifier's
//! prediction stream and the ensemble's, normalized by the joint entropy
//! of all classifier streams. It must lie in `[0, 1]`; a perfectly
//! correlated ensemble (`delta = 1`) makes the denominator zero and is
//! reported as a degenerate-input error, never as a silent infinity.

use crate::information::{joint_entropy, mutual_information};
use crate::traits::{check_predictions, EnsembleBound};
use ber_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// Tolerance for `delta` drifting past its mathematical range through
/// float error in the entropy sums.
const DELTA_TOL: f64 = 1e-9;

/// Mutual-information ensemble BER estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct MutualInformationBound;

impl MutualInformationBound {
    /// Create a new mutual-information ensemble estimator
    pub fn new() -> Self {
        Self
    }

    /// Estimate the BER, optionally overriding the derived ensemble
    /// predictor.
    ///
    /// When `ensemble_predictions` is `None` the ensemble predictor for
    /// each data point is the mean of the raw prediction values across
    /// classifiers, rounded to 0/1. The mean is taken before any
    /// rounding, so soft probabilities carry their weight into the vote.
    #[instrument(skip_all, fields(m = predictions.nrows(), e = predictions.ncols()))]
    pub fn estimate_with_ensemble(
        &self,
        predictions: &DMatrix<f64>,
        labels: &[u8],
        ensemble_predictions: Option<&DVector<f64>>,
    ) -> Result<f64> {
        check_predictions(predictions, labels)?;
        check_binary_labels(labels)?;
        let n_classifiers = predictions.ncols();
        if n_classifiers < 2 {
            return Err(Error::InsufficientData { expected: 2, actual: n_classifiers });
        }

        let streams = round_columns(predictions);
        let ensemble = match ensemble_predictions {
            Some(ens) => {
                if ens.len() != predictions.nrows() {
                    return Err(Error::row_mismatch(
                        predictions.nrows(),
                        ens.len(),
                        "ensemble predictions vector",
                    ));
                }
                ens.iter().map(|&v| u8::from(v >= 0.5)).collect::<Vec<u8>>()
            }
            None => mean_vote(predictions),
        };

        let m = labels.len() as f64;
        let mean_acc = streams
            .iter()
            .map(|s| s.iter().zip(labels).filter(|(p, l)| p == l).count() as f64 / m)
            .sum::<f64>()
            / n_classifiers as f64;
        let mean_err = 1.0 - mean_acc;
        let ensemble_err =
            ensemble.iter().zip(labels).filter(|(p, l)| p != l).count() as f64 / m;

        let ami = streams
            .iter()
            .map(|s| mutual_information(s, &ensemble))
            .sum::<f64>()
            / n_classifiers as f64;
        let total_entropy = joint_entropy(&streams);
        if total_entropy <= 0.0 {
            // every classifier is constant: the ensemble carries no
            // information to normalize against
            return Err(Error::DegenerateEnsembleCorrelation { delta: 1.0 });
        }

        let delta = ami / total_entropy;
        if !(-DELTA_TOL..=1.0 + DELTA_TOL).contains(&delta) {
            return Err(Error::DegenerateEnsembleCorrelation { delta });
        }
        let delta = delta.clamp(0.0, 1.0);
        if delta >= 1.0 - 1e-12 {
            return Err(Error::DegenerateEnsembleCorrelation { delta });
        }
        debug!(mean_err, ensemble_err, ami, total_entropy, delta, "ensemble statistics computed");

        let n = n_classifiers as f64;
        Ok((n * ensemble_err - ((n - 1.0) * delta + 1.0) * mean_err)
            / ((n - 1.0) * (1.0 - delta)))
    }
}

impl EnsembleBound for MutualInformationBound {
    fn estimate(&self, predictions: &DMatrix<f64>, labels: &[u8]) -> Result<f64> {
        self.estimate_with_ensemble(predictions, labels, None)
    }

    fn name(&self) -> &'static str {
        "Mutual-information ensemble bound"
    }
}

/// Round each classifier's column of probabilities to a 0/1 stream.
pub(crate) fn round_columns(predictions: &DMatrix<f64>) -> Vec<Vec<u8>> {
    (0..predictions.ncols())
        .map(|j| {
            predictions
                .column(j)
                .iter()
                .map(|&v| u8::from(v >= 0.5))
                .collect()
        })
        .collect()
}

/// Rounded mean of the raw prediction values, per data point.
fn mean_vote(predictions: &DMatrix<f64>) -> Vec<u8> {
    let e = predictions.ncols() as f64;
    predictions
        .row_iter()
        .map(|row| u8::from(row.sum() / e >= 0.5))
        .collect()
}

pub(crate) fn check_binary_labels(labels: &[u8]) -> Result<()> {
    if labels.iter().any(|&l| l > 1) {
        return Err(Error::InvalidInput(
            "labels must be 0 or 1 (use Dataset to remap raw labels)".to_string(),
        ));
    }
    Ok(())
}
