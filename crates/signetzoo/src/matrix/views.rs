//! Matrix views of a [`SignedGraph`].
//!
//! # Views Provided
//!
//! - **A** ([`adjacency_matrix`]): `A[i,j] = w` for edge `i → j`.
//! - **|A|** ([`absolute_adjacency_matrix`]): same pattern, magnitudes.
//! - **B = A + Aᵗ** ([`symmetric_adjacency_matrix`]): a bidirectional pair
//!   accumulates both weights; opposite weights that cancel are not stored.
//! - **|A| + |A|ᵗ** ([`absolute_symmetric_adjacency_matrix`]).
//! - **D** ([`degree_matrix`]): `D[i,i] = Σ_j |M[i,j]|` for a [`DegreeBase`].
//!
//! Zero-weight edges carry no sign and never appear in any view, so
//! `nnz(A)` is the number of signed edges and every entry of `|A|` is
//! strictly positive.

use serde::{Deserialize, Serialize};

use crate::graph::SignedGraph;
use crate::matrix::sparse::SparseMatrix;

// ---------------------------------------------------------------------------
// AdjacencyMeta
// ---------------------------------------------------------------------------

/// Summary statistics of an adjacency matrix.
///
/// Computed only on request by [`adjacency_matrix_with_meta`] or
/// [`AdjacencyMeta::from_matrix`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyMeta {
    /// `nnz / (n · n)`. Zero for an empty graph.
    pub density: f64,
    /// Number of positive entries.
    pub positive: usize,
    /// Number of negative entries.
    pub negative: usize,
    /// Number of stored entries (`nnz`).
    pub links: usize,
    /// `nnz / n`, the mean out-degree. Zero for an empty graph.
    pub average_links: f64,
}

impl AdjacencyMeta {
    /// Compute metadata for an adjacency matrix.
    #[must_use]
    pub fn from_matrix(adj: &SparseMatrix) -> Self {
        let (rows, cols) = adj.shape();
        let links = adj.nnz();
        let positive = adj.values().iter().filter(|&&v| v > 0.0).count();
        let negative = adj.values().iter().filter(|&&v| v < 0.0).count();

        Self {
            density: ratio(links, rows * cols),
            positive,
            negative,
            links,
            average_links: ratio(links, rows),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0_f64;
    }
    num as f64 / den as f64
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Signed adjacency matrix `A`.
#[must_use]
pub fn adjacency_matrix(graph: &SignedGraph) -> SparseMatrix {
    let n = graph.node_count();
    SparseMatrix::from_triplets(n, n, graph.edges())
}

/// Signed adjacency matrix together with its [`AdjacencyMeta`].
#[must_use]
pub fn adjacency_matrix_with_meta(graph: &SignedGraph) -> (SparseMatrix, AdjacencyMeta) {
    let adj = adjacency_matrix(graph);
    let meta = AdjacencyMeta::from_matrix(&adj);
    (adj, meta)
}

/// Absolute adjacency matrix `|A|`.
#[must_use]
pub fn absolute_adjacency_matrix(graph: &SignedGraph) -> SparseMatrix {
    adjacency_matrix(graph).abs()
}

/// Symmetric adjacency matrix `B = A + Aᵗ`.
#[must_use]
pub fn symmetric_adjacency_matrix(graph: &SignedGraph) -> SparseMatrix {
    let adj = adjacency_matrix(graph);
    adj.add(&adj.transpose())
}

/// Absolute symmetric adjacency matrix `|A| + |A|ᵗ`.
#[must_use]
pub fn absolute_symmetric_adjacency_matrix(graph: &SignedGraph) -> SparseMatrix {
    let abs = absolute_adjacency_matrix(graph);
    abs.add(&abs.transpose())
}

/// Which matrix a [`degree_matrix`] sums over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DegreeBase {
    /// `D[i,i] = Σ_j |A[i,j]|` (absolute out-degree).
    #[default]
    Adjacency,
    /// `D[i,i] = Σ_j |B[i,j]|` with `B = A + Aᵗ`.
    Symmetric,
    /// `D[i,i] = Σ_j (|A| + |A|ᵗ)[i,j]` (absolute in- plus out-degree).
    AbsoluteSymmetric,
}

/// Diagonal degree matrix over the chosen base.
///
/// Off-diagonal entries are exactly zero; zero degrees are not stored.
#[must_use]
pub fn degree_matrix(graph: &SignedGraph, base: DegreeBase) -> SparseMatrix {
    let m = match base {
        DegreeBase::Adjacency => absolute_adjacency_matrix(graph),
        DegreeBase::Symmetric => symmetric_adjacency_matrix(graph).abs(),
        DegreeBase::AbsoluteSymmetric => absolute_symmetric_adjacency_matrix(graph),
    };
    SparseMatrix::diagonal(&m.row_sums())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
