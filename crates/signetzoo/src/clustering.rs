//! Unsigned, signed and relative clustering coefficients.
//!
//! With `A` the signed adjacency matrix and `|A|` its magnitudes:
//!
//! ```text
//! unsigned = Σ(|A| ⊙ |A|²) / Σ(|A|²)
//! signed   = Σ(A ⊙ A²)     / Σ(|A|²)
//! relative = signed / unsigned
//! ```
//!
//! `Σ(|A|²)` counts (weighted) 2-paths; the numerators count the 2-paths
//! closed by a direct edge, with the signed variant rewarding triangles
//! whose signs multiply consistently.
//!
//! A graph with no 2-paths has both coefficients reported as `0.0`, and the
//! relative coefficient is `None` whenever the unsigned one is zero.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::graph::SignedGraph;
use crate::matrix::{SparseMatrix, adjacency_matrix};

/// All three coefficients, computed from one pair of matrix products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteringCoefficients {
    /// Fraction of 2-paths closed by an edge, ignoring sign.
    pub unsigned: f64,
    /// Sign-weighted fraction of closed 2-paths.
    pub signed: f64,
    /// `signed / unsigned`; `None` when the graph has no closed 2-path.
    pub relative: Option<f64>,
}

impl ClusteringCoefficients {
    /// Compute all coefficients for `graph`.
    #[must_use]
    #[instrument(skip(graph), fields(nodes = graph.node_count()))]
    pub fn compute(graph: &SignedGraph) -> Self {
        let adj = adjacency_matrix(graph);
        let abs = adj.abs();
        let sq_abs = abs.matmul(&abs);
        let paths = sq_abs.sum();

        let unsigned = closed_fraction(&abs, &sq_abs, paths);
        let signed = closed_fraction(&adj, &adj.matmul(&adj), paths);

        Self {
            unsigned,
            signed,
            relative: (unsigned != 0.0).then(|| signed / unsigned),
        }
    }
}

/// Unsigned clustering coefficient.
#[must_use]
pub fn clustering_coeff(graph: &SignedGraph) -> f64 {
    let abs = adjacency_matrix(graph).abs();
    let sq_abs = abs.matmul(&abs);
    closed_fraction(&abs, &sq_abs, sq_abs.sum())
}

/// Signed clustering coefficient.
#[must_use]
pub fn signed_clustering_coeff(graph: &SignedGraph) -> f64 {
    ClusteringCoefficients::compute(graph).signed
}

/// Relative signed clustering coefficient, `None` for a triangle-free graph.
#[must_use]
pub fn relative_signed_clustering_coeff(graph: &SignedGraph) -> Option<f64> {
    ClusteringCoefficients::compute(graph).relative
}

/// `Σ(m ⊙ squared) / paths`, or `0.0` when there are no 2-paths.
fn closed_fraction(m: &SparseMatrix, squared: &SparseMatrix, paths: f64) -> f64 {
    if paths == 0.0 {
        return 0.0;
    }
    m.hadamard_sum(squared) / paths
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
