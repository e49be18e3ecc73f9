//! Signed graph model consumed by every analysis.
//!
//! # Overview
//!
//! A [`SignedGraph`] is a directed graph whose edges carry a finite real
//! weight. The sign of the weight is what the analyses care about: positive
//! edges express trust or approval, negative edges distrust or disapproval.
//!
//! ## Pipeline
//!
//! ```text
//! (source, target, weight) triples      (resolved by the loader)
//!        ↓  build::SignedGraph::from_edges()
//! SignedGraph (dense node indices 0..n-1)
//!        ↓  matrix::adjacency_matrix() and friends
//! SparseMatrix views (A, |A|, A + Aᵗ, D)
//!        ↓
//! balance / clustering / ranking / prediction
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use signetzoo::graph::SignedGraph;
//!
//! let g = SignedGraph::from_edges([("alice", "bob", 1.0), ("bob", "carol", -1.0)])?;
//! assert_eq!(g.node_index("carol"), Some(2));
//! ```

pub mod build;

pub use build::SignedGraph;
