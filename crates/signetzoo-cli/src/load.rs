//! Edge-list loading.
//!
//! Input is plain text, one `source target weight` triple per line separated
//! by whitespace. Blank lines and lines starting with `#` are skipped.
//!
//! A pair listed once keeps its weight. Repeated ordered pairs collapse into
//! one edge carrying the sign of their summed weight (`±1`); a sum of exactly
//! zero means the pair was neutralized and it is dropped. Node identifiers are
//! kept in first-seen order, including the endpoints of dropped pairs, so
//! dense indices follow the file.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use signetzoo::SignedGraph;
use signetzoo::prediction::Sign;
use tracing::{debug, warn};

/// Resolved edge list: one entry per ordered pair, plus every node seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    /// Node identifiers in first-seen order.
    pub nodes: Vec<String>,
    /// `(source, target, weight)`, in first-seen order of the pair.
    pub edges: Vec<(String, String, f64)>,
}

impl EdgeList {
    /// Build a graph holding every node and every resolved edge.
    pub fn to_graph(&self) -> Result<SignedGraph> {
        graph_from(&self.nodes, &self.edges)
    }

    /// Shuffle edges with a seeded RNG and split into `(train, test)`.
    ///
    /// The first `⌊fraction · m⌋` shuffled edges are the training set. The
    /// training graph contains every node, so test pairs always resolve.
    pub fn split(&self, fraction: f64, seed: u64) -> Result<(SignedGraph, Vec<(String, String, f64)>)> {
        if !(fraction > 0.0 && fraction < 1.0) {
            bail!("split fraction must be in (0, 1), got {fraction}");
        }
        let mut edges = self.edges.clone();
        edges.shuffle(&mut StdRng::seed_from_u64(seed));

        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let train_len = (fraction * edges.len() as f64).floor() as usize;
        let test = edges.split_off(train_len);
        debug!(train = edges.len(), test = test.len(), seed, "split edge list");

        Ok((graph_from(&self.nodes, &edges)?, test))
    }
}

fn graph_from(nodes: &[String], edges: &[(String, String, f64)]) -> Result<SignedGraph> {
    let mut graph = SignedGraph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for (from, to, weight) in edges {
        graph.add_edge(from, to, *weight)?;
    }
    Ok(graph)
}

/// Parse edge-list text. `origin` names the source in error messages.
pub fn parse_edge_list(text: &str, origin: &str) -> Result<EdgeList> {
    let mut nodes: Vec<String> = Vec::new();
    let mut node_seen: HashSet<String> = HashSet::new();
    let mut order: Vec<(String, String)> = Vec::new();
    let mut sums: HashMap<(String, String), (f64, usize)> = HashMap::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [source, target, weight] = fields.as_slice() else {
            bail!(
                "{origin}:{}: expected `source target weight`, found {} field(s)",
                lineno + 1,
                fields.len()
            );
        };
        let weight: f64 = weight
            .parse()
            .with_context(|| format!("{origin}:{}: invalid weight `{weight}`", lineno + 1))?;
        if !weight.is_finite() {
            bail!("{origin}:{}: weight must be finite, found {weight}", lineno + 1);
        }

        for id in [*source, *target] {
            if node_seen.insert(id.to_string()) {
                nodes.push(id.to_string());
            }
        }

        let key = ((*source).to_string(), (*target).to_string());
        let entry = sums.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (0.0, 0)
        });
        entry.0 += weight;
        entry.1 += 1;
    }

    let mut duplicates = 0_usize;
    let mut neutral = 0_usize;
    let mut edges = Vec::with_capacity(order.len());
    for key in order {
        let Some(&(sum, count)) = sums.get(&key) else {
            continue;
        };
        if count == 1 {
            edges.push((key.0, key.1, sum));
            continue;
        }
        duplicates += 1;
        if sum == 0.0 {
            neutral += 1;
            continue;
        }
        edges.push((key.0, key.1, sum.signum()));
    }

    if duplicates > 0 || neutral > 0 {
        debug!(duplicates, neutral, "resolved repeated and neutral pairs");
    }

    Ok(EdgeList { nodes, edges })
}

/// Read and parse an edge-list file.
pub fn load_edge_list(path: &Path) -> Result<EdgeList> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_edge_list(&text, &path.display().to_string())
}

/// Labelled queries resolved against a training graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelledPairs {
    pub queries: Vec<(usize, usize)>,
    pub truth: Vec<Sign>,
}

/// Map test edges onto dense indices of `train`, skipping unknown nodes.
pub fn resolve_test_pairs(train: &SignedGraph, test: &[(String, String, f64)]) -> LabelledPairs {
    let mut pairs = LabelledPairs::default();
    let mut skipped = 0_usize;
    for (from, to, weight) in test {
        match (train.node_index(from), train.node_index(to)) {
            (Some(u), Some(v)) => {
                pairs.queries.push((u, v));
                pairs.truth.push(Sign::from_weight(*weight));
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "test pairs reference nodes missing from the training graph");
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triples_and_skips_comments() {
        let list = parse_edge_list("# header\n\na b 1\nb c -2.5\n", "mem").unwrap();
        assert_eq!(list.nodes, vec!["a", "b", "c"]);
        assert_eq!(list.edges.len(), 2);
        assert_eq!(list.edges[1].0, "b");
        assert!((list.edges[1].2 + 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_pairs_collapse_to_sign_of_sum() {
        let list = parse_edge_list("a b 1\na b 3\nc d -1\nc d -4\nb a -2.5\n", "mem").unwrap();
        assert_eq!(
            list.edges,
            vec![
                ("a".into(), "b".into(), 1.0),
                ("c".into(), "d".into(), -1.0),
                ("b".into(), "a".into(), -2.5),
            ]
        );
    }

    #[test]
    fn single_zero_weight_line_is_kept() {
        let list = parse_edge_list("a b 0\n", "mem").unwrap();
        assert_eq!(list.edges, vec![("a".into(), "b".into(), 0.0)]);
    }

    #[test]
    fn neutralized_pairs_are_dropped_but_nodes_kept() {
        let list = parse_edge_list("a b 1\na b -1\nb c 1\n", "mem").unwrap();
        assert_eq!(list.edges, vec![("b".into(), "c".into(), 1.0)]);
        assert_eq!(list.nodes, vec!["a", "b", "c"]);
        let g = list.to_graph().unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn malformed_line_reports_position() {
        let err = parse_edge_list("a b 1\na b\n", "edges.txt").unwrap_err();
        assert!(err.to_string().contains("edges.txt:2"), "{err}");
    }

    #[test]
    fn non_numeric_weight_is_an_error() {
        let err = parse_edge_list("a b heavy\n", "edges.txt").unwrap_err();
        assert!(err.to_string().contains("invalid weight"), "{err}");
    }

    #[test]
    fn split_keeps_every_node_in_training() {
        let text: String = (0..20).map(|i| format!("n{i} n{} 1\n", i + 1)).collect();
        let list = parse_edge_list(&text, "mem").unwrap();
        let (train, test) = list.split(0.75, 7).unwrap();
        assert_eq!(train.node_count(), 21);
        assert_eq!(train.edge_count(), 15);
        assert_eq!(test.len(), 5);

        let again = list.split(0.75, 7).unwrap().1;
        assert_eq!(test, again);
    }

    #[test]
    fn split_rejects_degenerate_fraction() {
        let list = parse_edge_list("a b 1\n", "mem").unwrap();
        assert!(list.split(1.0, 0).is_err());
        assert!(list.split(0.0, 0).is_err());
    }

    #[test]
    fn unknown_test_nodes_are_skipped() {
        let train = parse_edge_list("a b 1\n", "mem").unwrap().to_graph().unwrap();
        let test = vec![
            ("b".to_string(), "a".to_string(), -1.0),
            ("a".to_string(), "z".to_string(), 1.0),
        ];
        let pairs = resolve_test_pairs(&train, &test);
        assert_eq!(pairs.queries, vec![(1, 0)]);
        assert_eq!(pairs.truth, vec![Sign::Negative]);
    }
}
