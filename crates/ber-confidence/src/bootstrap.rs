//! Percentile bootstrap over the ensemble bounds
//!
//! Resampling-with-replacement wrapper that treats an ensemble bound as
//! a black-box callable: each iteration draws `M` row indices uniformly
//! with replacement, applies the selected bound to the resampled
//! predictions and labels, and the sorted estimates yield the interval.
//! The resample count and percentile order statistics are fixed (100
//! draws, values 4 and 94 zero-based, a two-sided 90% interval); only
//! the seed is configurable.

use crate::types::BootstrapInterval;
use ber_bounds::{EnsembleBound, MutualInformationBound, PluralityBound};
use ber_core::{Error, Result};
use nalgebra::DMatrix;
use rand::prelude::*;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Number of bootstrap resampling iterations.
pub const RESAMPLES: usize = 100;

/// Zero-based order statistics extracted from the sorted estimates.
const LOWER_ORDER_STAT: usize = 4;
const UPPER_ORDER_STAT: usize = 94;

/// Which ensemble bound the bootstrap re-invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsembleMethod {
    /// [`MutualInformationBound`], name `"mi"`
    MutualInformation,
    /// [`PluralityBound`], name `"plurality"`
    Plurality,
}

impl FromStr for EnsembleMethod {
    type Err = Error;

    /// Parse a method name; anything other than `"mi"` or `"plurality"`
    /// is a configuration error, never silently ignored.
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "mi" => Ok(Self::MutualInformation),
            "plurality" => Ok(Self::Plurality),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown ensemble method '{other}' (expected 'mi' or 'plurality')"
            ))),
        }
    }
}

/// Percentile bootstrap engine for ensemble-based BER estimates
#[derive(Debug, Clone, Copy)]
pub struct EnsembleBootstrap {
    method: EnsembleMethod,
    seed: Option<u64>,
}

impl EnsembleBootstrap {
    /// Create a bootstrap wrapper around the given ensemble method
    pub fn new(method: EnsembleMethod) -> Self {
        Self { method, seed: None }
    }

    /// Set the random seed for reproducible resampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Compute the two-sided 90% interval.
    ///
    /// Any failure of the underlying bound on a resample (degenerate
    /// correlation, no confident votes) propagates; no iteration is
    /// silently skipped or defaulted.
    #[instrument(skip(self, predictions, labels), fields(m = predictions.nrows(), e = predictions.ncols(), method = ?self.method))]
    pub fn interval(
        &self,
        predictions: &DMatrix<f64>,
        labels: &[u8],
    ) -> Result<BootstrapInterval> {
        if labels.len() != predictions.nrows() {
            return Err(Error::row_mismatch(
                predictions.nrows(),
                labels.len(),
                "bootstrap labels",
            ));
        }
        let m = predictions.nrows();
        if m == 0 {
            return Err(Error::InsufficientData { expected: 1, actual: 0 });
        }

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(seed, "running {RESAMPLES} bootstrap resamples");

        let mut estimates = Vec::with_capacity(RESAMPLES);
        for i in 0..RESAMPLES {
            let iter_seed = seed.wrapping_add(i as u64);
            let mut rng = StdRng::seed_from_u64(iter_seed);
            let indices: Vec<usize> = (0..m).map(|_| rng.gen_range(0..m)).collect();

            let resampled_predictions =
                DMatrix::from_fn(m, predictions.ncols(), |r, c| predictions[(indices[r], c)]);
            let resampled_labels: Vec<u8> = indices.iter().map(|&r| labels[r]).collect();

            let estimate = match self.method {
                EnsembleMethod::MutualInformation => MutualInformationBound::new()
                    .estimate(&resampled_predictions, &resampled_labels)?,
                EnsembleMethod::Plurality => PluralityBound::new()
                    .with_seed(iter_seed)
                    .estimate(&resampled_predictions, &resampled_labels)?,
            };
            estimates.push(estimate);
        }

        estimates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(BootstrapInterval::new(
            estimates[LOWER_ORDER_STAT],
            estimates[UPPER_ORDER_STAT],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unanimous, always-correct predictions: every resample yields the
    /// same plurality estimate.
    fn constant_ensemble() -> (DMatrix<f64>, Vec<u8>) {
        let labels: Vec<u8> = (0..20).map(|i| u8::from(i % 2 == 0)).collect();
        let predictions = DMatrix::from_fn(20, 3, |r, _| labels[r] as f64);
        (predictions, labels)
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("mi".parse::<EnsembleMethod>().unwrap(), EnsembleMethod::MutualInformation);
        assert_eq!("plurality".parse::<EnsembleMethod>().unwrap(), EnsembleMethod::Plurality);

        let err = "median".parse::<EnsembleMethod>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.to_string().contains("median"));
    }

    #[test]
    fn test_constant_inputs_collapse_the_interval() {
        let (predictions, labels) = constant_ensemble();
        let ci = EnsembleBootstrap::new(EnsembleMethod::Plurality)
            .with_seed(7)
            .interval(&predictions, &labels)
            .unwrap();
        assert_relative_eq!(ci.lower, ci.upper);
        assert_relative_eq!(ci.lower, 0.0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let labels: Vec<u8> = (0..16).map(|i| u8::from(i % 2 == 0)).collect();
        // three classifiers with distinct error patterns
        let predictions = DMatrix::from_fn(16, 3, |r, c| {
            let wrong = (r + c * 3) % 5 == 0;
            if wrong { 1.0 - labels[r] as f64 } else { labels[r] as f64 }
        });

        let bootstrap = EnsembleBootstrap::new(EnsembleMethod::MutualInformation).with_seed(42);
        let first = bootstrap.interval(&predictions, &labels).unwrap();
        let again = bootstrap.interval(&predictions, &labels).unwrap();
        assert_eq!(first, again);
        assert!(first.lower <= first.upper);
    }

    #[test]
    fn test_different_seeds_can_differ() {
        let labels: Vec<u8> = (0..16).map(|i| u8::from(i % 2 == 0)).collect();
        let predictions = DMatrix::from_fn(16, 3, |r, c| {
            let wrong = (r + c * 3) % 5 == 0;
            if wrong { 1.0 - labels[r] as f64 } else { labels[r] as f64 }
        });

        let a = EnsembleBootstrap::new(EnsembleMethod::MutualInformation)
            .with_seed(1)
            .interval(&predictions, &labels)
            .unwrap();
        let b = EnsembleBootstrap::new(EnsembleMethod::MutualInformation)
            .with_seed(2)
            .interval(&predictions, &labels)
            .unwrap();
        // not guaranteed distinct, but both must be well-formed
        assert!(a.lower <= a.upper);
        assert!(b.lower <= b.upper);
    }

    #[test]
    fn test_degenerate_resample_propagates() {
        // identical classifiers: the MI bound is degenerate on every
        // resample and the failure must surface, not become NaN
        let (predictions, labels) = constant_ensemble();
        let result = EnsembleBootstrap::new(EnsembleMethod::MutualInformation)
            .with_seed(7)
            .interval(&predictions, &labels);
        assert!(matches!(result, Err(Error::DegenerateEnsembleCorrelation { .. })));
    }

    #[test]
    fn test_label_mismatch_rejected() {
        let (predictions, _) = constant_ensemble();
        let labels = vec![0u8, 1];
        assert!(EnsembleBootstrap::new(EnsembleMethod::Plurality)
            .interval(&predictions, &labels)
            .is_err());
    }
}
