//! Fans minus freaks: the simplest signed popularity score.

use std::collections::HashMap;

use tracing::instrument;

use crate::graph::SignedGraph;
use crate::matrix::adjacency_matrix;

/// Per node, `#positive out-edges − #negative out-edges`.
///
/// Weights only contribute their sign. Nodes without outgoing signed edges
/// score `0`.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn fans_minus_freaks(graph: &SignedGraph) -> HashMap<String, i64> {
    let adj = adjacency_matrix(graph);
    let mut scores = vec![0_i64; graph.node_count()];
    for (u, _, w) in adj.iter() {
        scores[u] += if w > 0.0 { 1 } else { -1 };
    }

    graph
        .node_ids()
        .zip(scores)
        .map(|(id, s)| (id.to_string(), s))
        .collect()
}
