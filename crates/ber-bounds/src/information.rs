//! Discrete information measures over 0/1 prediction streams
//!
//! Empirical plug-in estimators in natural-log units, used by the
//! mutual-information ensemble bound. Streams are rounded classifier
//! predictions, so alphabets are binary per stream; the joint entropy
//! runs over the empirical distribution of whole prediction patterns.

use std::collections::HashMap;

/// Empirical entropy of one 0/1 stream, in nats.
pub(crate) fn entropy(stream: &[u8]) -> f64 {
    let n = stream.len() as f64;
    let ones = stream.iter().filter(|&&v| v == 1).count() as f64;
    plogp(ones / n) + plogp((n - ones) / n)
}

/// Empirical mutual information between two 0/1 streams, in nats.
///
/// `I(A; B) = H(A) + H(B) - H(A, B)` over the 2x2 joint contingency
/// table; zero-probability cells contribute nothing.
pub(crate) fn mutual_information(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len() as f64;
    let mut joint = [[0usize; 2]; 2];
    for (&va, &vb) in a.iter().zip(b) {
        joint[va as usize][vb as usize] += 1;
    }
    let h_joint: f64 = joint
        .iter()
        .flatten()
        .map(|&c| plogp(c as f64 / n))
        .sum();
    entropy(a) + entropy(b) - h_joint
}

/// Empirical joint entropy across `E` streams of length `M`, in nats.
///
/// Each data point contributes one `E`-bit pattern; the entropy is taken
/// over the empirical distribution of those patterns.
pub(crate) fn joint_entropy(streams: &[Vec<u8>]) -> f64 {
    let m = streams.first().map_or(0, Vec::len);
    if m == 0 {
        return 0.0;
    }
    let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
    for i in 0..m {
        let pattern: Vec<u8> = streams.iter().map(|s| s[i]).collect();
        *counts.entry(pattern).or_insert(0) += 1;
    }
    counts
        .values()
        .map(|&c| plogp(c as f64 / m as f64))
        .sum()
}

/// One `-p·ln(p)` term, with the `p = 0` limit handled.
fn plogp(p: f64) -> f64 {
    if p > 0.0 {
        -p * p.ln()
    } else {
        0.0
    }
}
