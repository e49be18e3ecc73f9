//! PageRank over signed weights, and the Negative Rank composite.
//!
//! # Algorithm
//!
//! Weighted PageRank by power iteration on the row-normalized weight matrix:
//!
//! ```text
//! x'(v) = α · ( Σ_u x(u) · W[u,v] / S(u)  +  Σ_{d dangling} x(d) / N )  +  (1 - α) / N
//! ```
//!
//! where `S(u)` is the (signed) row sum of `u`. Rows whose sum is zero are
//! dangling and spread their mass uniformly. With signed weights a node can
//! end up with a negative score; the total mass stays 1.
//!
//! # Variants
//!
//! - `signed = false` replaces every weight by its magnitude **before**
//!   iterating, which changes the transition structure.
//! - `symmetric = true` iterates over `W + Wᵗ`: each direction of a mutual
//!   pair becomes the sum of both weights, one-way edges are mirrored.
//!
//! The iteration budget is the contract. The loop stops early once the L1
//! change falls below `N · tolerance`; running out of iterations is reported
//! through [`PageRankResult::converged`], not as an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Result, SignedGraphError};
use crate::graph::SignedGraph;
use crate::matrix::{SparseMatrix, adjacency_matrix};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.8.
    pub alpha: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
    /// Per-node convergence threshold on the L1 change.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Keep edge signs. When `false`, weights are replaced by magnitudes.
    /// Default: `true`.
    pub signed: bool,
    /// Iterate over `W + Wᵗ` instead of `W`.
    /// Default: `false`.
    pub symmetric: bool,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            max_iter: 100,
            tolerance: 1e-6,
            signed: true,
            symmetric: false,
        }
    }
}

impl PageRankConfig {
    /// Default configuration over edge magnitudes.
    #[must_use]
    pub fn unsigned() -> Self {
        Self {
            signed: false,
            ..Self::default()
        }
    }

    /// Default configuration over symmetrized edge magnitudes.
    #[must_use]
    pub fn symmetric_unsigned() -> Self {
        Self {
            signed: false,
            symmetric: true,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(SignedGraphError::InvalidParameter {
                name: "alpha",
                value: self.alpha.to_string(),
                expected: "[0.0, 1.0]",
            });
        }
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(SignedGraphError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance.to_string(),
                expected: "a finite value >= 0",
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankResult {
    /// PageRank scores: node ID → score.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the L1 change fell below `N · tolerance` within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank over the graph's weights.
///
/// # Errors
///
/// Returns [`SignedGraphError::InvalidParameter`] if `alpha` lies outside
/// `[0, 1]` or `tolerance` is negative or non-finite.
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), signed = config.signed, symmetric = config.symmetric))]
pub fn pagerank(graph: &SignedGraph, config: &PageRankConfig) -> Result<PageRankResult> {
    config.validate()?;

    let weights = transition_weights(graph, config);
    let (ranks, iterations, converged) = power_iterate(&weights, config);

    if !converged && graph.node_count() > 0 {
        warn!(
            iterations,
            "PageRank did not converge within max_iter; returning last iterate"
        );
    }

    Ok(PageRankResult {
        scores: graph.scores_by_id(&ranks),
        iterations,
        converged,
    })
}

/// Negative Rank: `signed PageRank − β · unsigned PageRank`.
///
/// Both runs share `config` except for `signed`, which is forced on for the
/// first term and off for the second.
///
/// # Errors
///
/// Same as [`pagerank`], plus [`SignedGraphError::InvalidParameter`] for a
/// non-finite `beta`.
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
pub fn negative_rank(
    graph: &SignedGraph,
    beta: f64,
    config: &PageRankConfig,
) -> Result<HashMap<String, f64>> {
    if !beta.is_finite() {
        return Err(SignedGraphError::InvalidParameter {
            name: "beta",
            value: beta.to_string(),
            expected: "a finite value",
        });
    }

    let signed = pagerank(
        graph,
        &PageRankConfig {
            signed: true,
            ..*config
        },
    )?;
    let unsigned = pagerank(
        graph,
        &PageRankConfig {
            signed: false,
            ..*config
        },
    )?;

    Ok(signed
        .scores
        .into_iter()
        .map(|(id, sr)| {
            let pr = unsigned.scores.get(&id).copied().unwrap_or_default();
            (id, beta.mul_add(-pr, sr))
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Working copy of the weight matrix for the configured variant.
fn transition_weights(graph: &SignedGraph, config: &PageRankConfig) -> SparseMatrix {
    let mut weights = adjacency_matrix(graph);
    if !config.signed {
        weights = weights.abs();
    }
    if config.symmetric {
        weights = weights.add(&weights.transpose());
    }
    weights
}

/// Run the power iteration. Returns `(ranks, iterations, converged)`.
#[allow(clippy::cast_precision_loss)]
fn power_iterate(weights: &SparseMatrix, config: &PageRankConfig) -> (Vec<f64>, usize, bool) {
    let n = weights.shape().0;
    if n == 0 {
        return (Vec::new(), 0, true);
    }

    let n_f64 = n as f64;
    let inv_row_sums: Vec<Option<f64>> = weights
        .row_sums()
        .into_iter()
        .map(|s| (s != 0.0).then(|| 1.0 / s))
        .collect();
    let dangling: Vec<usize> = inv_row_sums
        .iter()
        .enumerate()
        .filter_map(|(i, inv)| inv.is_none().then_some(i))
        .collect();
    debug!(dangling = dangling.len(), "dangling rows");

    let teleport = (1.0 - config.alpha) / n_f64;
    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_mass: f64 = dangling.iter().map(|&i| ranks[i]).sum();
        let base = config.alpha.mul_add(dangling_mass / n_f64, teleport);
        for r in &mut new_ranks {
            *r = base;
        }

        for (u, v, w) in weights.iter() {
            if let Some(inv) = inv_row_sums[u] {
                new_ranks[v] += config.alpha * ranks[u] * w * inv;
            }
        }

        // Check convergence: L1 norm of delta.
        let delta: f64 = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    (ranks, iterations, converged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn total(scores: &HashMap<String, f64>) -> f64 {
        scores.values().sum()
    }

    #[test]
    fn empty_graph_returns_empty() {
        let result = pagerank(&SignedGraph::new(), &PageRankConfig::default()).unwrap();
        assert!(result.scores.is_empty());
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn single_node_gets_all_mass() {
        let mut g = SignedGraph::new();
        g.add_node("solo");
        let result = pagerank(&g, &PageRankConfig::default()).unwrap();
        assert!((result.scores["solo"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_pair_has_equal_scores() {
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("b", "a", 1.0)]).unwrap();
        let result = pagerank(&g, &PageRankConfig::unsigned()).unwrap();
        assert!((result.scores["a"] - 0.5).abs() < 1e-9);
        assert!((result.scores["b"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn invalid_alpha_is_rejected() {
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        let config = PageRankConfig {
            alpha: 1.5,
            ..PageRankConfig::default()
        };
        assert!(matches!(
            pagerank(&g, &config),
            Err(SignedGraphError::InvalidParameter { name: "alpha", .. })
        ));
    }

    #[test]
    fn unsigned_differs_from_signed_transition_structure() {
        // a endorses b and distrusts c; the signed walk normalizes by the
        // signed row sum (zero here), turning `a` into a dangling node.
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("a", "c", -1.0), ("b", "a", 1.0)])
            .unwrap();
        let signed = pagerank(&g, &PageRankConfig::default()).unwrap();
        let unsigned = pagerank(&g, &PageRankConfig::unsigned()).unwrap();
        assert!((total(&signed.scores) - 1.0).abs() < 1e-9);
        assert!((total(&unsigned.scores) - 1.0).abs() < 1e-9);
        assert!((signed.scores["c"] - unsigned.scores["c"]).abs() > 1e-6);
    }

    #[test]
    fn signed_scores_can_be_negative() {
        // Row sum of `a` is 2 - 1 = 1, so `c` receives a negative share.
        let g = SignedGraph::from_edges([("a", "b", 2.0), ("a", "c", -1.0)]).unwrap();
        let result = pagerank(&g, &PageRankConfig::default()).unwrap();
        assert!(result.scores["c"] < result.scores["a"]);
        assert!((total(&result.scores) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn symmetric_mirrors_one_way_edges() {
        // a→b only: symmetric mode sees a↔b, so both get equal rank.
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        let result = pagerank(&g, &PageRankConfig::symmetric_unsigned()).unwrap();
        assert!((result.scores["a"] - result.scores["b"]).abs() < 1e-9);
    }

    #[test]
    fn symmetric_leaves_input_graph_untouched() {
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("b", "a", 3.0)]).unwrap();
        let _ = pagerank(&g, &PageRankConfig::symmetric_unsigned()).unwrap();
        assert_eq!(g.weight(0, 1), Some(1.0));
        assert_eq!(g.weight(1, 0), Some(3.0));
    }

    #[test]
    fn unconverged_run_reports_flag() {
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("b", "c", 1.0), ("c", "a", 5.0)])
            .unwrap();
        let config = PageRankConfig {
            max_iter: 1,
            tolerance: 0.0,
            ..PageRankConfig::unsigned()
        };
        let result = pagerank(&g, &config).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
    }

    #[test]
    fn negative_rank_is_signed_minus_beta_unsigned() {
        let g = SignedGraph::from_edges([
            ("a", "b", 1.0),
            ("b", "c", -1.0),
            ("c", "a", 1.0),
            ("a", "c", 1.0),
        ])
        .unwrap();
        let beta = 0.5;
        let nr = negative_rank(&g, beta, &PageRankConfig::default()).unwrap();
        let sr = pagerank(&g, &PageRankConfig::default()).unwrap();
        let pr = pagerank(&g, &PageRankConfig::unsigned()).unwrap();
        for id in ["a", "b", "c"] {
            let expected = sr.scores[id] - beta * pr.scores[id];
            assert!((nr[id] - expected).abs() < 1e-12, "{id}");
        }
    }

    #[test]
    fn negative_rank_rejects_nan_beta() {
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        assert!(negative_rank(&g, f64::NAN, &PageRankConfig::default()).is_err());
    }
}
