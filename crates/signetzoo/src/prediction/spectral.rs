//! Spectral sign prediction by low-rank reconstruction.
//!
//! # Algorithm
//!
//! Factor a dense matrix `M` built from the training graph, keep the `dim`
//! leading components, and predict `u → v` from the sign of the
//! reconstructed entry:
//!
//! | Method | `M` | Factorization |
//! |--------|-----|---------------|
//! | `Adjacency` | `A` | SVD, `Σ σ_k U[u,k] Vᵗ[k,v]` |
//! | `SymmetricAdjacency` | `A + Aᵗ` | eigen, `Σ λ_k Q[u,k] Q[v,k]` |
//! | `ExponentialAdjacency` | `exp(A)` | SVD |
//! | `ExponentialSymmetricAdjacency` | `exp(A + Aᵗ)` | SVD |
//!
//! Eigenpairs are ranked by `|λ|`. A reconstructed entry `>= 0` predicts a
//! positive edge.
//!
//! # Rank
//!
//! `dim` must not exceed the numerical rank of `M`, counted as the number of
//! singular values (or eigenvalue magnitudes) above
//! `max · max(rows, cols) · ε`. Asking for more is an error rather than a
//! silently truncated reconstruction.
//!
//! All factorizations are dense (`O(n³)` time, `O(n²)` memory).

use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{Result, SignedGraphError};
use crate::graph::SignedGraph;
use crate::matrix::{adjacency_matrix, symmetric_adjacency_matrix};
use crate::prediction::{Sign, check_queries};

/// Node count above which a dense factorization is logged as expensive.
const LARGE_DENSE_NODES: usize = 2000;

/// Which matrix is factored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpectralMethod {
    #[default]
    Adjacency,
    SymmetricAdjacency,
    ExponentialAdjacency,
    ExponentialSymmetricAdjacency,
}

/// Configuration for [`spectral_prediction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Number of leading components kept. Default: 10.
    pub dim: usize,
    /// Default: [`SpectralMethod::Adjacency`].
    pub method: SpectralMethod,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            dim: 10,
            method: SpectralMethod::default(),
        }
    }
}

/// Predict query signs from a rank-`dim` reconstruction.
///
/// # Errors
///
/// - [`SignedGraphError::InvalidParameter`] when `dim == 0`.
/// - [`SignedGraphError::NodeOutOfRange`] for a query outside the graph.
/// - [`SignedGraphError::DimensionExceedsRank`] when `dim` is above the
///   numerical rank of the factored matrix.
/// - [`SignedGraphError::Decomposition`] if the factored matrix has
///   non-finite entries (an overflowing `exp`) or the SVD omits its factors.
#[instrument(skip(graph, queries), fields(nodes = graph.node_count(), queries = queries.len()))]
pub fn spectral_prediction(
    graph: &SignedGraph,
    queries: &[(usize, usize)],
    config: &SpectralConfig,
) -> Result<Vec<Sign>> {
    if config.dim == 0 {
        return Err(SignedGraphError::InvalidParameter {
            name: "dim",
            value: "0".to_string(),
            expected: ">= 1",
        });
    }
    check_queries(graph, queries)?;

    let n = graph.node_count();
    if n == 0 {
        return Err(SignedGraphError::DimensionExceedsRank {
            dim: config.dim,
            rank: 0,
        });
    }
    if n > LARGE_DENSE_NODES {
        warn!(nodes = n, "dense spectral factorization on a large graph");
    }

    let scores = match config.method {
        SpectralMethod::Adjacency => svd_scores(adjacency_matrix(graph).to_dense(), config.dim, queries),
        SpectralMethod::SymmetricAdjacency => {
            eigen_scores(symmetric_adjacency_matrix(graph).to_dense(), config.dim, queries)
        }
        SpectralMethod::ExponentialAdjacency => {
            svd_scores(adjacency_matrix(graph).to_dense().exp(), config.dim, queries)
        }
        SpectralMethod::ExponentialSymmetricAdjacency => svd_scores(
            symmetric_adjacency_matrix(graph).to_dense().exp(),
            config.dim,
            queries,
        ),
    }?;

    Ok(scores.into_iter().map(Sign::from_score).collect())
}

/// Reconstructed entries from the leading singular triplets.
fn svd_scores(m: DMatrix<f64>, dim: usize, queries: &[(usize, usize)]) -> Result<Vec<f64>> {
    ensure_finite(&m)?;
    let scale = m.nrows().max(m.ncols());
    let svd = m.svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(SignedGraphError::Decomposition(
            "SVD returned no singular vectors".to_string(),
        ));
    };

    let sigma = svd.singular_values.as_slice();
    let rank = svd.rank(rank_tolerance(sigma, scale));
    let keep = leading_components(sigma, dim, rank)?;

    Ok(queries
        .iter()
        .map(|&(i, j)| keep.iter().map(|&k| sigma[k] * u[(i, k)] * v_t[(k, j)]).sum())
        .collect())
}

/// Reconstructed entries from the eigenpairs of largest magnitude.
fn eigen_scores(m: DMatrix<f64>, dim: usize, queries: &[(usize, usize)]) -> Result<Vec<f64>> {
    ensure_finite(&m)?;
    let scale = m.nrows();
    let eigen = SymmetricEigen::new(m);
    let lambda = eigen.eigenvalues.as_slice();
    let q = &eigen.eigenvectors;

    let tolerance = rank_tolerance(lambda, scale);
    let rank = lambda.iter().filter(|v| v.abs() > tolerance).count();
    let keep = leading_components(lambda, dim, rank)?;

    Ok(queries
        .iter()
        .map(|&(i, j)| keep.iter().map(|&k| lambda[k] * q[(i, k)] * q[(j, k)]).sum())
        .collect())
}

/// A matrix exponential that overflowed cannot be factored meaningfully.
fn ensure_finite(m: &DMatrix<f64>) -> Result<()> {
    if m.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SignedGraphError::Decomposition(
            "matrix has non-finite entries (exp overflowed?)".to_string(),
        ))
    }
}

/// `max |v| · scale · ε`, the cut-off below which a component is noise.
#[allow(clippy::cast_precision_loss)]
fn rank_tolerance(values: &[f64], scale: usize) -> f64 {
    let largest = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    largest * scale as f64 * f64::EPSILON
}

/// Indices of the `dim` entries of largest magnitude, once `dim` is known
/// not to exceed `rank`.
fn leading_components(values: &[f64], dim: usize, rank: usize) -> Result<Vec<usize>> {
    debug!(rank, dim, "numerical rank");
    if dim > rank {
        return Err(SignedGraphError::DimensionExceedsRank { dim, rank });
    }

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].abs().total_cmp(&values[a].abs()));
    order.truncate(dim);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dim: usize, method: SpectralMethod) -> SpectralConfig {
        SpectralConfig { dim, method }
    }

    #[test]
    fn rank_one_adjacency_is_reconstructed() {
        // a=0, b=1, c=2: a single row of A is non-zero.
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("a", "c", -1.0)]).unwrap();
        let preds =
            spectral_prediction(&g, &[(0, 1), (0, 2)], &config(1, SpectralMethod::Adjacency))
                .unwrap();
        assert_eq!(preds, vec![Sign::Positive, Sign::Negative]);
    }

    #[test]
    fn dim_above_rank_is_an_error() {
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("a", "c", -1.0)]).unwrap();
        let err = spectral_prediction(&g, &[(0, 1)], &config(2, SpectralMethod::Adjacency))
            .unwrap_err();
        assert_eq!(err, SignedGraphError::DimensionExceedsRank { dim: 2, rank: 1 });
    }

    #[test]
    fn zero_dim_is_invalid() {
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        let err = spectral_prediction(&g, &[(0, 1)], &config(0, SpectralMethod::Adjacency))
            .unwrap_err();
        assert!(matches!(err, SignedGraphError::InvalidParameter { name: "dim", .. }));
    }

    #[test]
    fn symmetric_eigen_reconstruction() {
        // B = [[0,1,0],[1,0,-1],[0,-1,0]] has eigenvalues ±√2 and 0.
        let g = SignedGraph::from_edges([("a", "b", 1.0), ("b", "c", -1.0)]).unwrap();
        let preds = spectral_prediction(
            &g,
            &[(1, 0), (2, 1)],
            &config(2, SpectralMethod::SymmetricAdjacency),
        )
        .unwrap();
        assert_eq!(preds, vec![Sign::Positive, Sign::Negative]);

        let err = spectral_prediction(&g, &[(1, 0)], &config(3, SpectralMethod::SymmetricAdjacency))
            .unwrap_err();
        assert_eq!(err, SignedGraphError::DimensionExceedsRank { dim: 3, rank: 2 });
    }

    #[test]
    fn exponential_is_full_rank() {
        // exp([[0,-1],[0,0]]) = [[1,-1],[0,1]].
        let g = SignedGraph::from_edges([("a", "b", -1.0)]).unwrap();
        let preds = spectral_prediction(
            &g,
            &[(0, 1), (1, 1)],
            &config(2, SpectralMethod::ExponentialAdjacency),
        )
        .unwrap();
        assert_eq!(preds, vec![Sign::Negative, Sign::Positive]);
    }

    #[test]
    fn exponential_symmetric_mirrors_sign() {
        // exp([[0,-1],[-1,0]]) has off-diagonal -sinh(1).
        let g = SignedGraph::from_edges([("a", "b", -1.0)]).unwrap();
        let preds = spectral_prediction(
            &g,
            &[(1, 0), (0, 0)],
            &config(2, SpectralMethod::ExponentialSymmetricAdjacency),
        )
        .unwrap();
        assert_eq!(preds, vec![Sign::Negative, Sign::Positive]);
    }

    #[test]
    fn out_of_range_query_is_rejected() {
        let g = SignedGraph::from_edges([("a", "b", 1.0)]).unwrap();
        let err = spectral_prediction(&g, &[(5, 0)], &SpectralConfig::default()).unwrap_err();
        assert!(matches!(err, SignedGraphError::NodeOutOfRange { index: 5, .. }));
    }

    #[test]
    fn overflowing_exponential_is_a_decomposition_error() {
        let g = SignedGraph::from_edges([("a", "b", 1e3), ("b", "a", 1e3)]).unwrap();
        let err = spectral_prediction(
            &g,
            &[(0, 1)],
            &config(1, SpectralMethod::ExponentialSymmetricAdjacency),
        )
        .unwrap_err();
        assert!(matches!(err, SignedGraphError::Decomposition(_)), "{err:?}");
    }

    #[test]
    fn rank_tolerance_scales_with_largest_magnitude() {
        let tol = rank_tolerance(&[-4.0, 1.0, 0.0], 3);
        assert!((tol - 12.0 * f64::EPSILON).abs() < f64::EPSILON);
        assert!(rank_tolerance(&[], 0).abs() < f64::EPSILON);
    }

    #[test]
    fn method_names_are_kebab_case() {
        let json = serde_json::to_string(&SpectralMethod::ExponentialSymmetricAdjacency).unwrap();
        assert_eq!(json, "\"exponential-symmetric-adjacency\"");
    }
}
