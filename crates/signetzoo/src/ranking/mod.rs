//! Node ranking over signed weights.
//!
//! # Overview
//!
//! | Function | Measures |
//! |----------|----------|
//! | [`pagerank`] | Random-walk importance; signed, unsigned or symmetric |
//! | [`negative_rank`] | Signed PageRank penalized by unsigned PageRank |
//! | [`exponential_rank`] | Trust propagation where distrust lowers reputation |
//! | [`fans_minus_freaks`] | Positive minus negative out-edges |
//!
//! Every function maps node identifier → score and is deterministic for a
//! given graph and configuration.

pub mod exponential;
pub mod pagerank;
pub mod popularity;

pub use exponential::{ExponentialRankConfig, exponential_rank};
pub use pagerank::{PageRankConfig, PageRankResult, negative_rank, pagerank};
pub use popularity::fans_minus_freaks;
