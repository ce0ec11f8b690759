//! Property-based tests for the bound estimators
//!
//! Random Gaussian-mixture datasets with varied priors, separations and
//! per-class spreads; every bound must respect its range guarantees on
//! all of them.

use ber_bounds::{
    BhattacharyyaBound, DatasetBound, MahalanobisBound, NearestNeighborBound,
};
use ber_core::{Dataset, Error};
use nalgebra::DMatrix;
use proptest::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Two Gaussian clusters in 2D with configurable counts, separation and
/// per-class spread.
fn gaussian_mixture(
    n0: usize,
    n1: usize,
    separation: f64,
    spread0: f64,
    spread1: f64,
    seed: u64,
) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let mut rows = Vec::with_capacity(2 * (n0 + n1));
    let mut labels = Vec::with_capacity(n0 + n1);
    for _ in 0..n0 {
        rows.push(-separation / 2.0 + spread0 * noise.sample(&mut rng));
        rows.push(-separation / 2.0 + spread0 * noise.sample(&mut rng));
        labels.push(0.0);
    }
    for _ in 0..n1 {
        rows.push(separation / 2.0 + spread1 * noise.sample(&mut rng));
        rows.push(separation / 2.0 + spread1 * noise.sample(&mut rng));
        labels.push(1.0);
    }
    Dataset::new(DMatrix::from_row_slice(n0 + n1, 2, &rows), &labels)
        .expect("generated mixture is a valid dataset")
}

proptest! {
    // Mahalanobis output stays within [0, 2*p0*p1] for any mixture
    #[test]
    fn prop_mahalanobis_within_prior_range(
        n0 in 5usize..40,
        n1 in 5usize..40,
        separation in 0.0f64..8.0,
        spread0 in 0.5f64..2.0,
        spread1 in 0.5f64..2.0,
        seed in any::<u64>(),
    ) {
        let data = gaussian_mixture(n0, n1, separation, spread0, spread1, seed);
        let (p0, p1) = data.priors();
        let bound = MahalanobisBound::new().bound(&data).unwrap();
        prop_assert!(bound >= 0.0, "bound {bound} negative");
        prop_assert!(
            bound <= 2.0 * p0 * p1 + 1e-9,
            "bound {bound} exceeds prior ceiling {}",
            2.0 * p0 * p1
        );
    }

    // Bhattacharyya lower bound never exceeds the upper bound whenever
    // the radicand is non-negative; a degenerate radicand must surface
    // as its named error, never as NaN
    #[test]
    fn prop_bhattacharyya_ordered(
        n0 in 5usize..40,
        n1 in 5usize..40,
        separation in 0.0f64..8.0,
        spread0 in 0.5f64..2.0,
        spread1 in 0.5f64..2.0,
        seed in any::<u64>(),
    ) {
        let data = gaussian_mixture(n0, n1, separation, spread0, spread1, seed);
        match BhattacharyyaBound::new().bound(&data) {
            Ok(interval) => {
                prop_assert!(interval.lower >= 0.0);
                prop_assert!(interval.lower <= interval.upper + 1e-12);
                prop_assert!(!interval.lower.is_nan());
                prop_assert!(!interval.upper.is_nan());
            }
            Err(Error::DegenerateBhattacharyyaBound { radicand }) => {
                prop_assert!(radicand < 0.0);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    // NN bounds are ordered and within [0, 1] for any non-trivial data
    #[test]
    fn prop_nearest_neighbor_in_range(
        n0 in 2usize..40,
        n1 in 2usize..40,
        separation in 0.0f64..8.0,
        spread0 in 0.5f64..2.0,
        spread1 in 0.5f64..2.0,
        seed in any::<u64>(),
    ) {
        let data = gaussian_mixture(n0, n1, separation, spread0, spread1, seed);
        let interval = NearestNeighborBound::new().bound(&data).unwrap();
        prop_assert!(interval.lower >= 0.0);
        prop_assert!(interval.lower <= 0.5 + 1e-12);
        prop_assert!(interval.lower <= interval.upper);
        prop_assert!(interval.upper <= 1.0);
    }

    // Construction invariants hold for arbitrary two-value label
    // encodings: stored columns standardized, labels a bijection onto
    // {0, 1}
    #[test]
    fn prop_construction_invariants(
        n0 in 2usize..30,
        n1 in 2usize..30,
        label_a in -100.0f64..100.0,
        label_shift in 0.1f64..100.0,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise = Normal::new(0.0, 1.0).unwrap();
        let m = n0 + n1;
        let x = DMatrix::from_fn(m, 3, |_, _| noise.sample(&mut rng));
        let label_b = label_a + label_shift;
        let y: Vec<f64> = (0..m)
            .map(|i| if i < n0 { label_a } else { label_b })
            .collect();

        let data = Dataset::new(x, &y).unwrap();
        let expected_mapping = [label_a, label_b];
        prop_assert_eq!(data.label_mapping(), expected_mapping.as_slice());
        for (i, &l) in data.labels().iter().enumerate() {
            prop_assert_eq!(l, u8::from(i >= n0));
        }
        for j in 0..data.n_features() {
            let col: Vec<f64> = data.x().column(j).iter().copied().collect();
            let mean = col.iter().sum::<f64>() / col.len() as f64;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
            prop_assert!(mean.abs() < 1e-9);
            prop_assert!((var - 1.0).abs() < 1e-9);
            prop_assert!(var > 0.0);
        }
    }
}
