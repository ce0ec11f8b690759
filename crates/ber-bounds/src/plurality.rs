//! Plurality-vote ensemble bound
//!
//! Assumption-light BER estimate from simple majority voting with a
//! confidence threshold. A point has a "likely class" only when the
//! vote is sufficiently lopsided (the fraction of classifiers voting
//! for class 1 is at least `1 - lambda` or at most `lambda`), and only
//! such confident points enter the estimate; the rest are treated as
//! genuinely ambiguous. The result is the fraction of confident points
//! whose majority vote is wrong.
//!
//! This is a deliberate simplification of the full Tumer-Ghosh plurality
//! method: votes are not weighted by the pattern likelihood `p(x)`,
//! which has no closed form without a class-conditional density model.
//!
//! Exact 0.5 vote ties are broken by adding uniform noise in
//! `[-0.5, 0.5)` before rounding, so repeated runs on tied data are
//! non-deterministic unless a seed is supplied via
//! [`PluralityBound::with_seed`].

use crate::mutual_information::{check_binary_labels, round_columns};
use crate::traits::{check_predictions, EnsembleBound};
use ber_core::{Error, Result};
use nalgebra::DMatrix;
use rand::prelude::*;
use tracing::{debug, instrument};

/// Vote-lopsidedness threshold from the Tumer-Ghosh paper.
pub const DEFAULT_LAMBDA: f64 = 0.3;

/// Plurality-vote ensemble BER estimator
#[derive(Debug, Clone, Copy)]
pub struct PluralityBound {
    lambda: f64,
    seed: Option<u64>,
}

impl PluralityBound {
    /// Create a plurality estimator with the default `lambda` of 0.3
    pub fn new() -> Self {
        Self { lambda: DEFAULT_LAMBDA, seed: None }
    }

    /// Set the confidence threshold `lambda`
    ///
    /// # Panics
    /// Panics if `lambda` is not in `(0, 1)`.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        assert!(
            lambda > 0.0 && lambda < 1.0,
            "lambda must be in (0, 1)"
        );
        self.lambda = lambda;
        self
    }

    /// Set the random seed used for vote tie-breaking
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PluralityBound {
    fn default() -> Self {
        Self::new()
    }
}

impl EnsembleBound for PluralityBound {
    #[instrument(skip(self, predictions, labels), fields(m = predictions.nrows(), e = predictions.ncols(), lambda = self.lambda))]
    fn estimate(&self, predictions: &DMatrix<f64>, labels: &[u8]) -> Result<f64> {
        check_predictions(predictions, labels)?;
        check_binary_labels(labels)?;
        if predictions.ncols() == 0 {
            return Err(Error::InsufficientData { expected: 1, actual: 0 });
        }

        let streams = round_columns(predictions);
        let e = streams.len() as f64;
        let mut frac_1: Vec<f64> = (0..labels.len())
            .map(|i| streams.iter().map(|s| s[i] as f64).sum::<f64>() / e)
            .collect();

        // Confidence is judged on the raw vote fraction, before any
        // tie-break noise.
        let confident: Vec<bool> = frac_1
            .iter()
            .map(|&f| f >= 1.0 - self.lambda || f <= self.lambda)
            .collect();

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        for f in frac_1.iter_mut() {
            if *f == 0.5 {
                *f += rng.gen::<f64>() - 0.5;
            }
        }

        let n_confident = confident.iter().filter(|&&c| c).count();
        if n_confident == 0 {
            return Err(Error::NoConfidentVotes);
        }

        let n_confident_correct = frac_1
            .iter()
            .zip(labels)
            .zip(&confident)
            .filter(|((&f, &l), &c)| c && f.round() as u8 == l)
            .count();
        debug!(n_confident, n_confident_correct, "plurality votes tallied");

        Ok(1.0 - n_confident_correct as f64 / n_confident as f64)
    }

    fn name(&self) -> &'static str {
        "Plurality-vote ensemble bound"
    }
}
