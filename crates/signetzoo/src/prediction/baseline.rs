//! Heuristic sign predictors that need no factorization.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::SignedGraph;
use crate::matrix::adjacency_matrix;
use crate::prediction::{DefaultSign, Sign, check_queries, majority_sign};

/// Predict the training graph's [`majority_sign`] for every query.
///
/// # Errors
///
/// Returns [`crate::SignedGraphError::NodeOutOfRange`] for a query outside
/// the graph.
#[instrument(skip(graph, queries), fields(queries = queries.len()))]
pub fn majority_prediction(graph: &SignedGraph, queries: &[(usize, usize)]) -> Result<Vec<Sign>> {
    check_queries(graph, queries)?;
    let sign = majority_sign(graph);
    debug!(%sign, "majority sign");
    Ok(vec![sign; queries.len()])
}

/// Predict `u → v` from the reverse edge `v → u`, falling back to
/// `default` when there is none.
///
/// A zero-weight reverse edge carries no sign and counts as absent.
///
/// # Errors
///
/// Returns [`crate::SignedGraphError::NodeOutOfRange`] for a query outside
/// the graph.
#[instrument(skip(graph, queries), fields(queries = queries.len()))]
pub fn reciprocity_prediction(
    graph: &SignedGraph,
    queries: &[(usize, usize)],
    default: DefaultSign,
) -> Result<Vec<Sign>> {
    check_queries(graph, queries)?;
    let adj = adjacency_matrix(graph);
    let fallback = default.resolve(graph);

    Ok(queries
        .iter()
        .map(|&(u, v)| match adj.get(v, u) {
            w if w == 0.0 => fallback,
            w => Sign::from_weight(w),
        })
        .collect())
}

/// Score `u → v` by the weighted count of signed 2-paths `u → w → v`,
/// i.e. entry `(u, v)` of `A²`.
///
/// Non-zero entries are returned as-is, so the magnitude grows with the
/// number and weight of supporting paths; only the sign is a prediction.
/// A zero entry falls back to `default` as `±1.0`.
///
/// # Errors
///
/// Returns [`crate::SignedGraphError::NodeOutOfRange`] for a query outside
/// the graph.
#[instrument(skip(graph, queries), fields(queries = queries.len()))]
pub fn transitive_prediction(
    graph: &SignedGraph,
    queries: &[(usize, usize)],
    default: DefaultSign,
) -> Result<Vec<f64>> {
    check_queries(graph, queries)?;
    let adj = adjacency_matrix(graph);
    let squared = adj.matmul(&adj);
    let fallback = f64::from(default.resolve(graph).value());

    Ok(queries
        .iter()
        .map(|&(u, v)| match squared.get(u, v) {
            s if s == 0.0 => fallback,
            s => s,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignedGraphError;

    fn sample() -> SignedGraph {
        // a=0, b=1, c=2, d=3
        SignedGraph::from_edges([
            ("a", "b", 1.0),
            ("b", "c", -1.0),
            ("b", "a", 2.0),
            ("c", "d", 1.0),
            ("d", "c", -0.5),
        ])
        .unwrap()
    }

    #[test]
    fn majority_ignores_query_identity() {
        let preds = majority_prediction(&sample(), &[(0, 3), (3, 0), (2, 2)]).unwrap();
        assert_eq!(preds, vec![Sign::Positive; 3]);
    }

    #[test]
    fn reciprocity_copies_reverse_edge_sign() {
        let g = sample();
        let preds = reciprocity_prediction(&g, &[(0, 1), (2, 1), (2, 3)], DefaultSign::Positive)
            .unwrap();
        assert_eq!(preds, vec![Sign::Positive, Sign::Negative, Sign::Negative]);
    }

    #[test]
    fn reciprocity_uses_default_without_reverse_edge() {
        let g = sample();
        let preds = reciprocity_prediction(&g, &[(0, 3)], DefaultSign::Negative).unwrap();
        assert_eq!(preds, vec![Sign::Negative]);
        let preds = reciprocity_prediction(&g, &[(0, 3)], DefaultSign::Majority).unwrap();
        assert_eq!(preds, vec![Sign::Positive]);
    }

    #[test]
    fn transitive_returns_raw_path_weight() {
        let g = sample();
        // a→b→c = 1 · -1; b→a→b = 2 · 1.
        let preds = transitive_prediction(&g, &[(0, 2), (1, 1)], DefaultSign::Positive).unwrap();
        assert!((preds[0] + 1.0).abs() < 1e-12);
        assert!((preds[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn transitive_falls_back_on_missing_paths() {
        let preds =
            transitive_prediction(&sample(), &[(3, 0)], DefaultSign::Negative).unwrap();
        assert_eq!(preds.len(), 1);
        assert!((preds[0] + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn queries_are_bounds_checked() {
        let err = majority_prediction(&sample(), &[(0, 9)]).unwrap_err();
        assert!(matches!(err, SignedGraphError::NodeOutOfRange { index: 9, .. }));
    }
}
