//! Property tests for the matrix views and clustering coefficients.

use std::collections::HashSet;

use proptest::prelude::*;

use signetzoo::SignedGraph;
use signetzoo::clustering::ClusteringCoefficients;
use signetzoo::matrix::{
    DegreeBase, absolute_adjacency_matrix, absolute_symmetric_adjacency_matrix, adjacency_matrix,
    adjacency_matrix_with_meta, degree_matrix, symmetric_adjacency_matrix,
};

const EPSILON: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Random signed edge lists over up to 12 nodes, one edge per ordered pair.
fn arb_graph() -> impl Strategy<Value = SignedGraph> {
    prop::collection::vec(
        (0u8..12, 0u8..12, prop_oneof![-3i8..0, 1i8..4]),
        0..48,
    )
    .prop_map(|edges| {
        let mut seen = HashSet::new();
        let mut g = SignedGraph::new();
        for (u, v, w) in edges {
            if seen.insert((u, v)) {
                g.add_edge(&format!("n{u}"), &format!("n{v}"), f64::from(w))
                    .unwrap();
            }
        }
        g
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn symmetric_views_are_symmetric(g in arb_graph()) {
        prop_assert!(symmetric_adjacency_matrix(&g).is_symmetric());
        prop_assert!(absolute_symmetric_adjacency_matrix(&g).is_symmetric());
    }

    #[test]
    fn absolute_view_keeps_pattern_and_is_positive(g in arb_graph()) {
        let a = adjacency_matrix(&g);
        let abs = absolute_adjacency_matrix(&g);
        prop_assert_eq!(a.nnz(), abs.nnz());
        prop_assert!(abs.values().iter().all(|&v| v > 0.0));
    }

    #[test]
    fn meta_counts_add_up(g in arb_graph()) {
        let (a, meta) = adjacency_matrix_with_meta(&g);
        prop_assert_eq!(meta.links, a.nnz());
        prop_assert_eq!(meta.positive + meta.negative, meta.links);
        prop_assert!((0.0..=1.0).contains(&meta.density));
    }

    #[test]
    fn degree_matrices_are_diagonal(g in arb_graph()) {
        for base in [DegreeBase::Adjacency, DegreeBase::Symmetric, DegreeBase::AbsoluteSymmetric] {
            let d = degree_matrix(&g, base);
            prop_assert!(d.iter().all(|(r, c, v)| r == c && v > 0.0));
        }
    }

    #[test]
    fn signed_clustering_is_bounded_by_unsigned(g in arb_graph()) {
        let cc = ClusteringCoefficients::compute(&g);
        prop_assert!(cc.unsigned >= 0.0);
        prop_assert!(cc.signed.abs() <= cc.unsigned + EPSILON);
        if let Some(relative) = cc.relative {
            prop_assert!((-1.0 - EPSILON..=1.0 + EPSILON).contains(&relative));
        }
    }
}

// ---------------------------------------------------------------------------
// Known topologies
// ---------------------------------------------------------------------------

#[test]
fn balanced_triangle_has_relative_one() {
    // Every closed 2-path has a closing edge of the same sign as the path.
    let g = SignedGraph::from_edges([
        ("a", "b", 1.0),
        ("b", "c", -1.0),
        ("a", "c", -1.0),
        ("b", "a", 1.0),
    ])
    .unwrap();
    let cc = ClusteringCoefficients::compute(&g);
    assert!(cc.unsigned > 0.0);
    assert!((cc.relative.unwrap() - 1.0).abs() < EPSILON);
}
