//! Exponential Rank: trust propagation that lets negative links lower a
//! node's standing instead of being discarded.
//!
//! # Algorithm
//!
//! ```text
//! p ← uniform
//! repeat max_iter times:
//!     k ← Aᵗ p            (reputation: weighted opinions received)
//!     p ← softmax(k / mu)  (trust: sharply favours well-regarded nodes)
//! score ← Aᵗ p
//! ```
//!
//! The reported score is the reputation vector after one more propagation,
//! not the trust distribution `p`. The softmax subtracts the maximum before
//! exponentiating, so a small `mu` never overflows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, SignedGraphError};
use crate::graph::SignedGraph;
use crate::matrix::adjacency_matrix;

/// Configuration for [`exponential_rank`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExponentialRankConfig {
    /// Softmax temperature. Smaller values concentrate trust on fewer nodes.
    /// Default: 0.2.
    pub mu: f64,
    /// Number of trust updates. Default: 100.
    pub max_iter: usize,
}

impl Default for ExponentialRankConfig {
    fn default() -> Self {
        Self {
            mu: 0.2,
            max_iter: 100,
        }
    }
}

/// Compute Exponential Rank scores.
///
/// # Errors
///
/// Returns [`SignedGraphError::InvalidParameter`] if `mu` is not a positive
/// finite number.
#[allow(clippy::cast_precision_loss)]
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), mu = config.mu))]
pub fn exponential_rank(
    graph: &SignedGraph,
    config: &ExponentialRankConfig,
) -> Result<HashMap<String, f64>> {
    if !(config.mu > 0.0 && config.mu.is_finite()) {
        return Err(SignedGraphError::InvalidParameter {
            name: "mu",
            value: config.mu.to_string(),
            expected: "a finite value > 0",
        });
    }

    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let adj = adjacency_matrix(graph);
    let mut trust = vec![1.0 / n as f64; n];
    for _ in 0..config.max_iter {
        let reputation = adj.transpose_mul_vec(&trust);
        trust = softmax(&reputation, config.mu);
    }
    debug!(iterations = config.max_iter, "exponential rank finished");

    Ok(graph.scores_by_id(&adj.transpose_mul_vec(&trust)))
}

/// `exp(x / mu)` normalized to sum to one, shifted by the maximum.
fn softmax(x: &[f64], mu: f64) -> Vec<f64> {
    let max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out: Vec<f64> = x.iter().map(|&v| ((v - max) / mu).exp()).collect();
    // The maximal entry contributes exp(0) = 1, so the sum is at least 1.
    let total: f64 = out.iter().sum();
    for v in &mut out {
        *v /= total;
    }
    out
}
