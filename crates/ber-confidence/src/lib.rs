//! Bootstrap confidence intervals for ensemble-based BER estimates
//!
//! The ensemble bounds in `ber-bounds` are empirical estimates subject
//! to sampling variance. This crate wraps either of them in a
//! percentile bootstrap: 100 resamples with replacement, re-running the
//! bound on each resample, and reading the 5th and 95th order statistics
//! off the sorted estimates as a two-sided 90% interval.

mod bootstrap;
mod types;

pub use bootstrap::{EnsembleBootstrap, EnsembleMethod, RESAMPLES};
pub use types::BootstrapInterval;
