//! Validated binary-classification dataset
//!
//! [`Dataset`] is the single stateful input to every bound estimator.
//! Construction establishes the invariants the bound formulas rely on:
//!
//! - zero-variance feature columns are stripped (they carry no
//!   separability information and make covariance matrices singular);
//! - surviving columns are standardized to zero mean, unit variance, so
//!   the scale-sensitive Mahalanobis/Bhattacharyya distances operate in a
//!   common feature scale;
//! - labels are remapped to exactly {0, 1}; more than two distinct label
//!   values is a fatal construction error.
//!
//! Construction takes ownership of the feature matrix and returns a new
//! immutable value; caller-supplied memory is never mutated in place.

use crate::linalg::{column_means, column_stds};
use crate::{Error, Result};
use nalgebra::DMatrix;
use std::collections::HashMap;
use tracing::debug;

/// An `M × D` standardized feature matrix with binary 0/1 labels.
///
/// Immutable after construction; every bound method reads it without
/// mutating, so concurrent calls to different bounds on a shared
/// `Dataset` are safe.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: DMatrix<f64>,
    y: Vec<u8>,
    /// Distinct original label values, ascending. The smaller value maps
    /// to class 0, the larger to class 1.
    label_values: Vec<f64>,
    /// Subgroup-category name to per-row membership array. Stored
    /// unchanged; reserved for subgroup-conditional analysis and
    /// consumed by no current computation.
    subgroups: HashMap<String, Vec<f64>>,
}

impl Dataset {
    /// Build a dataset from raw features and labels.
    ///
    /// Each row of `x` is one data point; `y` must have one entry per
    /// row and contain at most two distinct values.
    pub fn new(x: DMatrix<f64>, y: &[f64]) -> Result<Self> {
        Self::with_subgroups(x, y, HashMap::new())
    }

    /// Build a dataset, attaching a subgroup-membership map.
    pub fn with_subgroups(
        x: DMatrix<f64>,
        y: &[f64],
        subgroups: HashMap<String, Vec<f64>>,
    ) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(Error::InsufficientData { expected: 1, actual: 0 });
        }
        if y.len() != x.nrows() {
            return Err(Error::row_mismatch(x.nrows(), y.len(), "label vector"));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("feature matrix"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("label vector"));
        }

        let x = standardize(drop_constant_columns(x)?);
        let (y, label_values) = remap_labels(y)?;

        Ok(Self { x, y, label_values, subgroups })
    }

    /// Standardized feature matrix (no zero-variance columns).
    pub fn x(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// Labels, remapped to 0/1.
    pub fn labels(&self) -> &[u8] {
        &self.y
    }

    /// Number of data points.
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Number of surviving feature columns.
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Distinct original label values in ascending order; index is the
    /// 0/1 class each was mapped to.
    pub fn label_mapping(&self) -> &[f64] {
        &self.label_values
    }

    /// The stored subgroup-membership map.
    pub fn subgroups(&self) -> &HashMap<String, Vec<f64>> {
        &self.subgroups
    }

    /// Empirical class priors `(p0, p1)`.
    pub fn priors(&self) -> (f64, f64) {
        let p1 = self.y.iter().map(|&l| l as f64).sum::<f64>() / self.y.len() as f64;
        (1.0 - p1, p1)
    }

    /// Rows belonging to the given class, as an owned submatrix.
    pub fn class_rows(&self, class: u8) -> DMatrix<f64> {
        let indices: Vec<usize> = self
            .y
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect();
        DMatrix::from_fn(indices.len(), self.x.ncols(), |r, c| self.x[(indices[r], c)])
    }

    /// Number of rows in each class, `(n0, n1)`.
    pub fn class_counts(&self) -> (usize, usize) {
        let n1 = self.y.iter().filter(|&&l| l == 1).count();
        (self.y.len() - n1, n1)
    }
}

/// Drop feature columns whose standard deviation across all rows is zero.
fn drop_constant_columns(x: DMatrix<f64>) -> Result<DMatrix<f64>> {
    let stds = column_stds(&x);
    let keep: Vec<usize> = (0..x.ncols()).filter(|&j| stds[j] > 0.0).collect();
    if keep.is_empty() {
        return Err(Error::InvalidInput(
            "every feature column is constant".to_string(),
        ));
    }
    if keep.len() < x.ncols() {
        debug!(
            dropped = x.ncols() - keep.len(),
            kept = keep.len(),
            "dropped constant feature columns"
        );
    }
    Ok(DMatrix::from_fn(x.nrows(), keep.len(), |r, c| x[(r, keep[c])]))
}

/// Rescale every column to zero mean, unit variance.
fn standardize(mut x: DMatrix<f64>) -> DMatrix<f64> {
    let means = column_means(&x);
    let stds = column_stds(&x);
    for j in 0..x.ncols() {
        let mut col = x.column_mut(j);
        col.add_scalar_mut(-means[j]);
        col /= stds[j];
    }
    x
}

/// Remap raw labels onto {0, 1}, smaller distinct value first.
fn remap_labels(y: &[f64]) -> Result<(Vec<u8>, Vec<f64>)> {
    let mut distinct: Vec<f64> = y.to_vec();
    distinct.sort_by(|a, b| a.partial_cmp(b).expect("labels checked finite"));
    distinct.dedup();
    if distinct.len() > 2 {
        return Err(Error::UnsupportedLabelCardinality { distinct: distinct.len() });
    }
    let mapped = y.iter().map(|&v| u8::from(v != distinct[0])).collect();
    Ok((mapped, distinct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simple_x() -> DMatrix<f64> {
        DMatrix::from_row_slice(4, 3, &[
            1.0, 5.0, 0.0, //
            2.0, 5.0, 1.0, //
            3.0, 5.0, 0.0, //
            4.0, 5.0, 1.0,
        ])
    }

    #[test]
    fn test_constant_column_dropped() {
        let ds = Dataset::new(simple_x(), &[0.0, 0.0, 1.0, 1.0]).unwrap();
        // middle column is constant and must be stripped
        assert_eq!(ds.n_features(), 2);
        assert_eq!(ds.n_samples(), 4);
    }

    #[test]
    fn test_columns_standardized() {
        let ds = Dataset::new(simple_x(), &[0.0, 0.0, 1.0, 1.0]).unwrap();
        for j in 0..ds.n_features() {
            let col: Vec<f64> = ds.x().column(j).iter().copied().collect();
            let mean = col.iter().sum::<f64>() / col.len() as f64;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-12);
            assert_relative_eq!(var, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_all_constant_rejected() {
        let x = DMatrix::from_element(3, 2, 7.0);
        assert!(matches!(
            Dataset::new(x, &[0.0, 1.0, 0.0]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_label_remap_is_bijective() {
        // arbitrary two-valued labels: -3.5 maps to 0, 12.0 maps to 1
        let ds = Dataset::new(simple_x(), &[12.0, -3.5, 12.0, -3.5]).unwrap();
        assert_eq!(ds.labels(), &[1, 0, 1, 0]);
        assert_eq!(ds.label_mapping(), &[-3.5, 12.0]);
    }

    #[test]
    fn test_three_labels_rejected() {
        let err = Dataset::new(simple_x(), &[0.0, 1.0, 2.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLabelCardinality { distinct: 3 }));
    }

    #[test]
    fn test_row_mismatch_rejected() {
        assert!(matches!(
            Dataset::new(simple_x(), &[0.0, 1.0]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut x = simple_x();
        x[(0, 0)] = f64::NAN;
        assert!(Dataset::new(x, &[0.0, 0.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_priors_and_class_counts() {
        let ds = Dataset::new(simple_x(), &[0.0, 0.0, 0.0, 1.0]).unwrap();
        let (p0, p1) = ds.priors();
        assert_relative_eq!(p0, 0.75);
        assert_relative_eq!(p1, 0.25);
        assert_eq!(ds.class_counts(), (3, 1));
        assert_eq!(ds.class_rows(0).nrows(), 3);
        assert_eq!(ds.class_rows(1).nrows(), 1);
    }

    #[test]
    fn test_subgroups_stored_unchanged() {
        let mut groups = HashMap::new();
        groups.insert("site".to_string(), vec![0.0, 1.0, 0.0, 1.0]);
        let ds = Dataset::with_subgroups(simple_x(), &[0.0, 0.0, 1.0, 1.0], groups).unwrap();
        assert_eq!(ds.subgroups()["site"], vec![0.0, 1.0, 0.0, 1.0]);
    }
}
