//! Bayes Error Rate estimation toolkit
//!
//! Estimates the Bayes Error Rate (BER), the irreducible minimum
//! classification error for a binary-labeled dataset, with several
//! independent statistical estimators, each trading assumptions for
//! tightness of bound. High BER means the feature representation itself
//! is limiting; low BER with a poorly performing classifier points to a
//! modeling shortfall instead.
//!
//! This crate re-exports the workspace members and offers
//! [`BerEstimator`], a single stateful entry point constructed once per
//! dataset:
//!
//! - [`ber_core`]: validated [`Dataset`], unified [`Error`], matrix
//!   numerics
//! - [`ber_bounds`]: Mahalanobis, Bhattacharyya, nearest-neighbor and
//!   ensemble-based bound estimators
//! - [`ber_confidence`]: percentile bootstrap intervals over the
//!   ensemble bounds
//!
//! # Example
//!
//! ```rust
//! use ber_stats::BerEstimator;
//! use nalgebra::DMatrix;
//!
//! // two well-separated classes in 2D
//! let x = DMatrix::from_row_slice(8, 2, &[
//!     -4.0, -4.2, -3.9, -4.1, -4.1, -3.8, -4.2, -4.0,
//!      4.0,  4.1,  3.8,  4.2,  4.1,  3.9,  3.9,  4.0,
//! ]);
//! let y = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];
//!
//! let estimator = BerEstimator::new(x, &y).unwrap();
//! let upper = estimator.mahalanobis_bound().unwrap();
//! let nn = estimator.nn_bound().unwrap();
//! assert!(upper < 0.1);
//! assert!(nn.upper < 0.1);
//! ```

pub use ber_bounds::{
    bhattacharyya, mahalanobis, mutual_information, nearest_neighbor, plurality, BhattacharyyaBound,
    BoundInterval, DatasetBound, EnsembleBound, MahalanobisBound, MutualInformationBound,
    NearestNeighborBound, PluralityBound, DEFAULT_LAMBDA,
};
pub use ber_confidence::{BootstrapInterval, EnsembleBootstrap, EnsembleMethod, RESAMPLES};
pub use ber_core::{Dataset, Error, Result};

use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// Stateful BER estimator over one dataset.
///
/// Validates and standardizes the data once at construction; each bound
/// method independently re-derives the per-class statistics it needs.
/// The ensemble methods additionally take a transient `M × E` matrix of
/// individual classifier predictions, which is never stored.
#[derive(Debug, Clone)]
pub struct BerEstimator {
    dataset: Dataset,
}

impl BerEstimator {
    /// Build an estimator from raw features and labels.
    ///
    /// Rows of `x` are data points; `y` needs one entry per row and at
    /// most two distinct values (any two values, remapped to 0/1).
    pub fn new(x: DMatrix<f64>, y: &[f64]) -> Result<Self> {
        Ok(Self { dataset: Dataset::new(x, y)? })
    }

    /// Build an estimator, attaching a subgroup-membership map
    /// (reserved for future subgroup-conditional analysis).
    pub fn with_subgroups(
        x: DMatrix<f64>,
        y: &[f64],
        subgroups: HashMap<String, Vec<f64>>,
    ) -> Result<Self> {
        Ok(Self { dataset: Dataset::with_subgroups(x, y, subgroups)? })
    }

    /// The validated, standardized dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Mahalanobis-distance upper bound on the BER.
    pub fn mahalanobis_bound(&self) -> Result<f64> {
        MahalanobisBound::new().bound(&self.dataset)
    }

    /// Bhattacharyya-distance `(lower, upper)` bounds on the BER.
    pub fn bhattacharyya_bound(&self) -> Result<BoundInterval> {
        BhattacharyyaBound::new().bound(&self.dataset)
    }

    /// Nearest-neighbor `(lower, upper)` bounds on the BER.
    pub fn nn_bound(&self) -> Result<BoundInterval> {
        NearestNeighborBound::new().bound(&self.dataset)
    }

    /// Mutual-information ensemble estimate of the BER.
    ///
    /// `ensemble_predictions` overrides the derived majority-vote
    /// ensemble predictor when supplied.
    pub fn mi_ensemble_bound(
        &self,
        individual_predictions: &DMatrix<f64>,
        ensemble_predictions: Option<&DVector<f64>>,
    ) -> Result<f64> {
        MutualInformationBound::new().estimate_with_ensemble(
            individual_predictions,
            self.dataset.labels(),
            ensemble_predictions,
        )
    }

    /// Plurality-vote ensemble estimate of the BER, with the default
    /// confidence threshold.
    pub fn plurality_ensemble_bound(&self, individual_predictions: &DMatrix<f64>) -> Result<f64> {
        PluralityBound::new().estimate(individual_predictions, self.dataset.labels())
    }

    /// Two-sided 90% bootstrap interval for an ensemble-based estimate.
    pub fn bootstrap_ensemble(
        &self,
        individual_predictions: &DMatrix<f64>,
        method: EnsembleMethod,
    ) -> Result<BootstrapInterval> {
        EnsembleBootstrap::new(method).interval(individual_predictions, self.dataset.labels())
    }
}
