//! Core types for Bayes Error Rate estimation
//!
//! This crate provides the foundation shared by the bound estimators:
//!
//! - A unified [`Error`] type and [`Result`] alias
//! - The validated [`Dataset`] type (standardized features, 0/1 labels)
//! - Matrix numerics used by the parametric bounds: sample covariance,
//!   exact-then-pseudo inversion, and log-abs-determinants
//!
//! The Bayes Error Rate is the irreducible minimum classification error
//! for a feature distribution. Every estimator in the companion crates
//! consumes a [`Dataset`] built here; construction establishes the
//! invariants (no zero-variance column, standardized scale, binary
//! labels) that the bound formulas rely on.

pub mod dataset;
pub mod error;
pub mod linalg;

pub use dataset::Dataset;
pub use error::{Error, Result};
