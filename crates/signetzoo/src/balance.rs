//! Structural balance detection.
//!
//! # Overview
//!
//! A signed graph is **balanced** when its nodes split into clusters such
//! that every positive edge stays inside a cluster and every negative edge
//! runs between two different clusters ("the friend of my friend is my
//! friend, the enemy of my friend is my enemy").
//!
//! # Algorithm
//!
//! 1. Treat the graph as undirected: every arc can be walked both ways.
//! 2. Label clusters with a breadth-first search that only follows positive
//!    edges. Each unlabeled node (in index order) seeds a new cluster.
//! 3. Check every edge. A positive edge across clusters means the input is
//!    malformed; a negative edge inside a cluster means the graph is
//!    unbalanced. Either stops the check at the first offending edge.
//! 4. On request, build the cluster graph (one node per cluster, an edge for
//!    each negative crossing) and two-color it. A bipartite cluster graph is
//!    **strong** balance and yields a split of the original nodes into two
//!    camps; otherwise the balance is **weak** and there is no split.
//!
//! Self-loops are validated but otherwise ignored. When both `u → v` and `v → u` exist they are both
//! checked, so a pair with conflicting signs is reported as unbalanced.

use std::collections::{BTreeSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, SignedGraphError};
use crate::graph::SignedGraph;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Outcome of [`is_balanced`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Whether the graph satisfies structural balance.
    pub balanced: bool,
    /// Cluster details. `None` unless requested and the graph is balanced.
    pub metadata: Option<BalanceMetadata>,
}

/// Cluster structure of a balanced graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceMetadata {
    /// Number of positive-edge clusters.
    pub cluster_count: usize,
    /// Node identifiers of each cluster, indexed by cluster id.
    pub clusters: Vec<BTreeSet<String>>,
    /// Strong (two camps) or weak (three or more mutually hostile clusters).
    pub strength: BalanceStrength,
    /// The two camps when the balance is strong.
    pub possible_split: Option<PossibleSplit>,
}

/// Strength of structural balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStrength {
    Strong,
    Weak,
}

impl BalanceStrength {
    /// Lowercase label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
        }
    }
}

/// Two disjoint node sets with only negative edges between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleSplit {
    /// Camp containing the lowest-numbered cluster of each hostile component,
    /// plus every cluster that has no negative edges at all.
    pub left: BTreeSet<String>,
    /// The opposing camp.
    pub right: BTreeSet<String>,
}

impl PossibleSplit {
    /// Return `true` if `a` and `b` describe the same split in either order.
    #[must_use]
    pub fn matches(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
        (&self.left == a && &self.right == b) || (&self.left == b && &self.right == a)
    }
}

// ---------------------------------------------------------------------------
// Balance detection
// ---------------------------------------------------------------------------

/// Check whether `graph` is structurally balanced.
///
/// With `meta_data = true` a balanced graph also reports its clusters,
/// balance strength and, for strong balance, the two-camp split.
///
/// # Errors
///
/// Returns [`SignedGraphError::ZeroWeightEdge`] if any edge, self-loops
/// included, has weight zero. Neutral edges must be removed by the caller.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn is_balanced(graph: &SignedGraph, meta_data: bool) -> Result<BalanceReport> {
    for (u, v, w) in graph.edges() {
        if w == 0.0 {
            return Err(SignedGraphError::ZeroWeightEdge {
                from: graph.node_id(u).unwrap_or_default().to_string(),
                to: graph.node_id(v).unwrap_or_default().to_string(),
            });
        }
    }

    let labels = label_positive_clusters(graph);
    let cluster_count = labels.iter().copied().max().map_or(0, |m| m + 1);
    debug!(cluster_count, "labelled positive-edge clusters");

    let mut cluster_graph = UnGraph::<usize, ()>::with_capacity(cluster_count, 0);
    for c in 0..cluster_count {
        cluster_graph.add_node(c);
    }

    for (u, v, w) in graph.edges() {
        if u == v {
            continue;
        }
        let (lu, lv) = (labels[u], labels[v]);
        if w > 0.0 && lu != lv {
            // Cannot happen for well-formed input: the BFS follows every
            // positive edge.
            debug!(u, v, "positive edge crosses clusters");
            return Ok(unbalanced());
        }
        if w < 0.0 {
            if lu == lv {
                debug!(u, v, cluster = lu, "negative edge inside a cluster");
                return Ok(unbalanced());
            }
            cluster_graph.update_edge(NodeIndex::new(lu), NodeIndex::new(lv), ());
        }
    }

    if !meta_data {
        return Ok(BalanceReport {
            balanced: true,
            metadata: None,
        });
    }

    let mut clusters: Vec<BTreeSet<String>> = vec![BTreeSet::new(); cluster_count];
    for (node, &label) in labels.iter().enumerate() {
        if let Some(id) = graph.node_id(node) {
            clusters[label].insert(id.to_string());
        }
    }

    let (strength, possible_split) = match two_color(&cluster_graph) {
        Some(colors) => {
            let mut split = PossibleSplit {
                left: BTreeSet::new(),
                right: BTreeSet::new(),
            };
            for (cluster, members) in clusters.iter().enumerate() {
                let side = if colors[cluster] {
                    &mut split.right
                } else {
                    &mut split.left
                };
                side.extend(members.iter().cloned());
            }
            (BalanceStrength::Strong, Some(split))
        }
        None => (BalanceStrength::Weak, None),
    };
    debug!(strength = strength.as_str(), "balance strength");

    Ok(BalanceReport {
        balanced: true,
        metadata: Some(BalanceMetadata {
            cluster_count,
            clusters,
            strength,
            possible_split,
        }),
    })
}

const fn unbalanced() -> BalanceReport {
    BalanceReport {
        balanced: false,
        metadata: None,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Assign a cluster label to every node by BFS over positive edges only.
///
/// Returns one label per dense node index. Labels are written once.
fn label_positive_clusters(graph: &SignedGraph) -> Vec<usize> {
    let n = graph.node_count();

    let mut friends: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (u, v, w) in graph.edges() {
        if u != v && w > 0.0 {
            friends[u].push(v);
            friends[v].push(u);
        }
    }

    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut next_label = 0;
    let mut queue = VecDeque::new();

    for seed in 0..n {
        if labels[seed].is_some() {
            continue;
        }
        labels[seed] = Some(next_label);
        queue.push_back(seed);

        while let Some(node) = queue.pop_front() {
            for &friend in &friends[node] {
                if labels[friend].is_none() {
                    labels[friend] = Some(next_label);
                    queue.push_back(friend);
                }
            }
        }
        next_label += 1;
    }

    labels.into_iter().map(|l| l.unwrap_or_default()).collect()
}

/// Two-color an undirected graph by BFS.
///
/// Returns `Some(colors)` (`false` for the side of each component's first
/// node) if the graph is bipartite, `None` otherwise.
fn two_color(g: &UnGraph<usize, ()>) -> Option<Vec<bool>> {
    let n = g.node_count();
    let mut colors: Vec<Option<bool>> = vec![None; n];
    let mut queue = VecDeque::new();

    for start in g.node_indices() {
        if colors[start.index()].is_some() {
            continue;
        }
        colors[start.index()] = Some(false);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let color = colors[node.index()].unwrap_or_default();
            for neighbor in g.neighbors(node) {
                match colors[neighbor.index()] {
                    None => {
                        colors[neighbor.index()] = Some(!color);
                        queue.push_back(neighbor);
                    }
                    Some(c) if c == color => return None,
                    Some(_) => {}
                }
            }
        }
    }

    Some(colors.into_iter().map(Option::unwrap_or_default).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
