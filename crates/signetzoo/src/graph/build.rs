//! Construction of the signed directed graph handed to every analysis.
//!
//! # Overview
//!
//! [`SignedGraph`] wraps a [`petgraph`] `DiGraph<String, f64>`: node weights
//! are caller-supplied identifiers and edge weights are the signed weights.
//! Nodes are only ever appended, so a node's `NodeIndex::index()` is its dense
//! position `0..n-1` in every matrix built from the graph.
//!
//! ## Boundary rules
//!
//! - One edge per ordered pair. Multi-edges must be collapsed by the loader
//!   (see the CLI's edge-list reader); a second `add_edge` for the same pair
//!   is a [`SignedGraphError::DuplicateEdge`].
//! - Weights must be finite. Zero is accepted so that sign-dependent
//!   algorithms can report the neutral edge themselves.
//! - Self-loops are kept; each algorithm decides whether to use them.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::{
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::error::{Result, SignedGraphError};

// ---------------------------------------------------------------------------
// SignedGraph
// ---------------------------------------------------------------------------

/// A directed graph with signed, real-valued edge weights.
#[derive(Debug, Clone, Default)]
pub struct SignedGraph {
    /// Directed graph: nodes = identifiers, edges = signed weights.
    graph: DiGraph<String, f64>,
    /// Mapping from identifier to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
}

impl SignedGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target, weight)` triples.
    ///
    /// Endpoints are added as nodes in order of first appearance.
    ///
    /// # Errors
    ///
    /// Returns [`SignedGraphError::DuplicateEdge`] if an ordered pair repeats
    /// and [`SignedGraphError::NonFiniteWeight`] for NaN/infinite weights.
    pub fn from_edges<I, S, T>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T, f64)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from.as_ref(), to.as_ref(), weight)?;
        }
        Ok(graph)
    }

    /// Add a node if it is not present yet and return its index.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    /// Add the directed edge `from -> to`, creating missing endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SignedGraphError::NonFiniteWeight`] or
    /// [`SignedGraphError::DuplicateEdge`]; the graph is unchanged on error.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<EdgeIndex> {
        if !weight.is_finite() {
            return Err(SignedGraphError::NonFiniteWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }
        if let (Some(&a), Some(&b)) = (self.node_map.get(from), self.node_map.get(to)) {
            if self.graph.contains_edge(a, b) {
                return Err(SignedGraphError::DuplicateEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
        let a = self.add_node(from);
        let b = self.add_node(to);
        Ok(self.graph.add_edge(a, b, weight))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges (including zero-weight ones).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Dense index of a node identifier.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_map.get(id).map(|idx| idx.index())
    }

    /// Identifier of the node at a dense index.
    #[must_use]
    pub fn node_id(&self, index: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(index))
            .map(String::as_str)
    }

    /// Node identifiers in dense-index order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All edges as `(source index, target index, weight)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Weight of `from -> to` by dense index, if the edge exists.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        if from >= self.node_count() || to >= self.node_count() {
            return None;
        }
        self.graph
            .find_edge(NodeIndex::new(from), NodeIndex::new(to))
            .and_then(|e| self.graph.edge_weight(e))
            .copied()
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().sum()
    }

    /// Borrow the underlying petgraph graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<String, f64> {
        &self.graph
    }

    /// Key a dense per-node vector by node identifier.
    ///
    /// `values` must have one entry per node, in dense-index order.
    pub(crate) fn scores_by_id(&self, values: &[f64]) -> HashMap<String, f64> {
        self.node_ids()
            .zip(values.iter().copied())
            .map(|(id, v)| (id.to_string(), v))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_get_dense_indices_in_first_seen_order() {
        let g = SignedGraph::from_edges([("b", "a", 1.0), ("a", "c", -1.0)]).unwrap();
        assert_eq!(g.node_index("b"), Some(0));
        assert_eq!(g.node_index("a"), Some(1));
        assert_eq!(g.node_index("c"), Some(2));
        assert_eq!(g.node_id(2), Some("c"));
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_ordered_pair_is_rejected() {
        let mut g = SignedGraph::new();
        g.add_edge("a", "b", 1.0).unwrap();
        let err = g.add_edge("a", "b", -1.0).unwrap_err();
        assert_eq!(
            err,
            SignedGraphError::DuplicateEdge {
                from: "a".into(),
                to: "b".into()
            }
        );
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn reverse_direction_is_not_a_duplicate() {
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("b", "a", -2.0)]).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(0, 1), Some(1.0));
        assert_eq!(g.weight(1, 0), Some(-2.0));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let err = SignedGraph::from_edges([("a", "b", f64::NAN)]).unwrap_err();
        assert!(matches!(err, SignedGraphError::NonFiniteWeight { .. }));
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = SignedGraph::new();
        let a = g.add_node("a");
        let again = g.add_node("a");
        assert_eq!(a, again);
        assert_eq!(g.node_count(), 1);
        assert!(!g.is_empty());
    }

    #[test]
    fn weight_out_of_range_is_none() {
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        assert_eq!(g.weight(0, 7), None);
        assert_eq!(g.weight(1, 0), None);
    }

    #[test]
    fn total_weight_sums_signed_weights() {
        let g = SignedGraph::from_edges([("a", "b", 2.0), ("b", "c", -0.5)]).unwrap();
        assert!((g.total_weight() - 1.5).abs() < 1e-12);
    }
}
