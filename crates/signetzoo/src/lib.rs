#![forbid(unsafe_code)]
//! signetzoo library: analyses of signed directed graphs.
//!
//! # Modules
//!
//! - [`graph`]: the [`SignedGraph`] model.
//! - [`matrix`]: sparse adjacency, symmetric and degree views.
//! - [`balance`]: structural balance with cluster metadata.
//! - [`clustering`]: unsigned, signed and relative clustering coefficients.
//! - [`ranking`]: PageRank variants, Negative Rank, Exponential Rank.
//! - [`prediction`]: link-sign heuristics and their evaluation.
//!
//! # Conventions
//!
//! - **Errors**: Return [`Result`] with [`SignedGraphError`] for precondition
//!   violations. Degenerate numeric outcomes are sentinels, never errors.
//! - **Logging**: Use `tracing` macros. Entry points are `#[instrument]`ed;
//!   installing a subscriber is left to the binary.

pub mod balance;
pub mod clustering;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod prediction;
pub mod ranking;

pub use balance::{BalanceReport, is_balanced};
pub use clustering::ClusteringCoefficients;
pub use error::{Result, SignedGraphError};
pub use graph::SignedGraph;
pub use prediction::{ConfusionMatrix, DefaultSign, Sign};
