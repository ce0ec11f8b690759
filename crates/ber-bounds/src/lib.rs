//! Bayes Error Rate bound estimators
//!
//! Each estimator computes a bound on the Bayes Error Rate, the
//! irreducible minimum classification error, from a different corner of
//! classical statistical-learning theory, trading assumptions for
//! tightness:
//!
//! - [`MahalanobisBound`]: covariance-normalized distance between class
//!   means, assuming approximately Gaussian classes (upper bound).
//! - [`BhattacharyyaBound`]: distributional-overlap measure sensitive to
//!   covariance differences the Mahalanobis distance ignores (two-sided).
//! - [`NearestNeighborBound`]: distribution-free bound from the
//!   empirical 1-NN error rate (two-sided).
//! - [`MutualInformationBound`]: Tumer-Ghosh estimate from an ensemble's
//!   predictions and their mutual-information-based correlation; needs no
//!   access to raw features.
//! - [`PluralityBound`]: assumption-light majority-vote estimate with a
//!   confidence threshold.
//!
//! The first three read a [`ber_core::Dataset`] through the
//! [`DatasetBound`] trait; the ensemble estimators consume a transient
//! `M × E` prediction matrix through [`EnsembleBound`].
//!
//! # Example
//!
//! ```rust
//! use ber_bounds::{DatasetBound, MahalanobisBound};
//! use ber_core::Dataset;
//! use nalgebra::DMatrix;
//!
//! let x = DMatrix::from_row_slice(6, 2, &[
//!     -5.0, -5.1, -4.9, -5.0, -5.1, -4.8,
//!      5.0,  5.2,  4.9,  5.1,  5.0,  4.9,
//! ]);
//! let y = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
//! let data = Dataset::new(x, &y).unwrap();
//!
//! let bound = MahalanobisBound::new().bound(&data).unwrap();
//! assert!(bound < 0.1); // well-separated classes
//! ```

mod bhattacharyya;
mod information;
mod mahalanobis;
mod mutual_information;
mod nearest_neighbor;
mod plurality;
mod traits;
mod types;

pub use bhattacharyya::BhattacharyyaBound;
pub use mahalanobis::MahalanobisBound;
pub use mutual_information::MutualInformationBound;
pub use nearest_neighbor::NearestNeighborBound;
pub use plurality::{PluralityBound, DEFAULT_LAMBDA};
pub use traits::{DatasetBound, EnsembleBound};
pub use types::BoundInterval;

// Convenience constructors

pub fn mahalanobis() -> MahalanobisBound {
    MahalanobisBound::new()
}

pub fn bhattacharyya() -> BhattacharyyaBound {
    BhattacharyyaBound::new()
}

pub fn nearest_neighbor() -> NearestNeighborBound {
    NearestNeighborBound::new()
}

pub fn mutual_information() -> MutualInformationBound {
    MutualInformationBound::new()
}

pub fn plurality() -> PluralityBound {
    PluralityBound::new()
}
