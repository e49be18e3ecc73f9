//! Error type shared by every analysis in the crate.
//!
//! Only precondition violations are errors. Degenerate numeric outcomes
//! (no 2-paths, empty graph) are reported through sentinel values and an
//! unbalanced graph is a normal [`crate::balance::BalanceReport`].

/// Errors returned by graph construction and the signed-graph analyses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignedGraphError {
    /// The same ordered pair was added twice. Duplicates must be resolved
    /// by the loader before the graph reaches the core.
    #[error("duplicate edge {from} -> {to}: resolve multi-edges before building the graph")]
    DuplicateEdge { from: String, to: String },

    /// An edge weight was NaN or infinite.
    #[error("edge {from} -> {to} has non-finite weight {weight}")]
    NonFiniteWeight { from: String, to: String, weight: f64 },

    /// A zero-weight (neutral) edge reached an algorithm that needs a sign.
    #[error("edge {from} -> {to} has zero weight; neutral edges carry no sign")]
    ZeroWeightEdge { from: String, to: String },

    /// A numeric parameter is outside its accepted range.
    #[error("parameter `{name}` = {value} is out of range (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The requested factorization rank is larger than the matrix supports.
    #[error("dim = {dim} exceeds the numerical rank {rank} of the matrix")]
    DimensionExceedsRank { dim: usize, rank: usize },

    /// A dense decomposition did not produce the requested factors.
    #[error("matrix decomposition failed: {0}")]
    Decomposition(String),

    /// A fallback-sign token other than `positive`, `negative`, `majority`.
    #[error("invalid default sign `{0}` (expected positive, negative or majority)")]
    InvalidDefaultSign(String),

    /// A query referenced a node index outside `0..node_count`.
    #[error("node index {index} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { index: usize, node_count: usize },

    /// Ground truth and predictions have different lengths.
    #[error("label length mismatch: {truth} ground-truth labels vs {predicted} predictions")]
    LengthMismatch { truth: usize, predicted: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SignedGraphError>;
