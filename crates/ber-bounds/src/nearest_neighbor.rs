//! Nearest-neighbor bound
//!
//! Distribution-free, non-parametric bound from the Cover-Hart relation
//! between the nearest-neighbor error rate and the Bayes error. No
//! Gaussian assumption: the upper bound is simply the fraction of points
//! whose nearest neighbor (excluding the point itself, Euclidean
//! distance over the standardized features) carries a different label,
//! and the lower bound is `(1 - sqrt(1 - 2·upper))/2`.
//!
//! Queries run against an in-crate kd-tree (median split, one axis per
//! level), so the whole pass is O(M log M) for moderate dimensionality.
//! Distance ties are broken deterministically: among equidistant
//! neighbors the lowest row index wins.

use crate::traits::DatasetBound;
use crate::types::BoundInterval;
use ber_core::{Dataset, Error, Result};
use nalgebra::DMatrix;
use tracing::{debug, instrument};

/// Nearest-neighbor BER bound estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborBound;

impl NearestNeighborBound {
    /// Create a new nearest-neighbor bound estimator
    pub fn new() -> Self {
        Self
    }
}

impl DatasetBound for NearestNeighborBound {
    type Output = BoundInterval;

    #[instrument(skip(data), fields(n = data.n_samples(), d = data.n_features()))]
    fn bound(&self, data: &Dataset) -> Result<BoundInterval> {
        let m = data.n_samples();
        if m < 2 {
            return Err(Error::InsufficientData { expected: 2, actual: m });
        }

        let tree = KdTree::build(data.x());
        let labels = data.labels();
        let mismatches = (0..m)
            .filter(|&i| {
                let nn = tree.nearest_excluding(i);
                labels[nn] != labels[i]
            })
            .count();

        let upper = mismatches as f64 / m as f64;
        // The conversion saturates at 0.5: past that point the radicand
        // goes negative and the lower bound pins to one half.
        let lower = 0.5 * (1.0 - (1.0 - 2.0 * upper).max(0.0).sqrt());
        debug!(mismatches, upper, lower, "nearest-neighbor error rate computed");

        Ok(BoundInterval::new(lower, upper))
    }

    fn name(&self) -> &'static str {
        "Nearest-neighbor bound"
    }
}

/// Exact nearest-neighbor index over the rows of a matrix.
///
/// Classic kd-tree: the split axis cycles with depth, the split point is
/// the median row along that axis. `nearest_excluding` prunes a subtree
/// only when every point in it is strictly farther than the current
/// best, so equidistant candidates are always visited and the
/// `(distance, row index)` ordering makes the result deterministic.
struct KdTree<'a> {
    x: &'a DMatrix<f64>,
    root: Option<Box<KdNode>>,
}

struct KdNode {
    point: usize,
    axis: usize,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

impl<'a> KdTree<'a> {
    fn build(x: &'a DMatrix<f64>) -> Self {
        let mut indices: Vec<usize> = (0..x.nrows()).collect();
        let root = build_node(x, &mut indices, 0);
        Self { x, root }
    }

    /// Row index of the nearest neighbor of row `query`, excluding
    /// `query` itself. Requires at least two rows.
    fn nearest_excluding(&self, query: usize) -> usize {
        debug_assert!(self.x.nrows() >= 2);
        let mut best: Option<(f64, usize)> = None;
        descend(self.x, self.root.as_deref(), query, &mut best);
        best.expect("tree holds at least one other point").1
    }
}

fn build_node(x: &DMatrix<f64>, indices: &mut [usize], depth: usize) -> Option<Box<KdNode>> {
    if indices.is_empty() {
        return None;
    }
    let axis = depth % x.ncols();
    indices.sort_unstable_by(|&a, &b| {
        x[(a, axis)]
            .partial_cmp(&x[(b, axis)])
            .expect("dataset features are finite")
            .then(a.cmp(&b))
    });
    let mid = indices.len() / 2;
    let point = indices[mid];
    let (lo, rest) = indices.split_at_mut(mid);
    let hi = &mut rest[1..];
    Some(Box::new(KdNode {
        point,
        axis,
        left: build_node(x, lo, depth + 1),
        right: build_node(x, hi, depth + 1),
    }))
}

fn descend(
    x: &DMatrix<f64>,
    node: Option<&KdNode>,
    query: usize,
    best: &mut Option<(f64, usize)>,
) {
    let Some(node) = node else { return };

    if node.point != query {
        let d = dist_sq(x, query, node.point);
        let improves = match *best {
            None => true,
            Some((bd, bi)) => d < bd || (d == bd && node.point < bi),
        };
        if improves {
            *best = Some((d, node.point));
        }
    }

    let offset = x[(query, node.axis)] - x[(node.point, node.axis)];
    let (near, far) = if offset < 0.0 {
        (node.left.as_deref(), node.right.as_deref())
    } else {
        (node.right.as_deref(), node.left.as_deref())
    };

    descend(x, near, query, best);
    // Visit the far side unless every point there is strictly farther
    // than the current best (equality kept for tie-breaking).
    let cross = match *best {
        None => true,
        Some((bd, _)) => offset * offset <= bd,
    };
    if cross {
        descend(x, far, query, best);
    }
}

fn dist_sq(x: &DMatrix<f64>, a: usize, b: usize) -> f64 {
    (0..x.ncols())
        .map(|j| {
            let d = x[(a, j)] - x[(b, j)];
            d * d
        })
        .sum()
}
