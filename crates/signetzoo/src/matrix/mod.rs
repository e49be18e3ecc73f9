//! Matrix layer: sparse views of a signed graph.
//!
//! Every other analysis reads the graph through these views. Each call
//! returns a fresh allocation that shares nothing with the graph.
//!
//! - [`sparse`] — the CSR [`SparseMatrix`] type and its arithmetic.
//! - [`views`] — adjacency, absolute, symmetric and degree matrices.

pub mod sparse;
pub mod views;

pub use sparse::SparseMatrix;
pub use views::{
    AdjacencyMeta, DegreeBase, absolute_adjacency_matrix, absolute_symmetric_adjacency_matrix,
    adjacency_matrix, adjacency_matrix_with_meta, degree_matrix, symmetric_adjacency_matrix,
};
