//! Link-sign prediction.
//!
//! # Overview
//!
//! Each predictor takes a training [`SignedGraph`] and a list of queries,
//! `(source, target)` pairs of dense node indices into that graph, and
//! returns one prediction per query in query order.
//!
//! - [`baseline`]: majority, reciprocity and transitive heuristics.
//! - [`spectral`]: low-rank reconstruction of (exponentiated) adjacency
//!   matrices.
//! - [`evaluate`]: confusion matrix against held-out labels.

use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignedGraphError};
use crate::graph::SignedGraph;

pub mod baseline;
pub mod evaluate;
pub mod spectral;

pub use baseline::{majority_prediction, reciprocity_prediction, transitive_prediction};
pub use evaluate::{ConfusionMatrix, confusion_matrix};
pub use spectral::{SpectralConfig, SpectralMethod, spectral_prediction};

/// A predicted or observed edge sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    /// Sign of a reconstructed score: `>= 0` is positive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Sign of an edge weight: `> 0` is positive.
    #[must_use]
    pub fn from_weight(weight: f64) -> Self {
        if weight > 0.0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

/// Fallback used when a heuristic has no evidence for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultSign {
    Positive,
    Negative,
    /// The training graph's [`majority_sign`].
    #[default]
    Majority,
}

impl DefaultSign {
    /// Resolve the fallback against a training graph.
    #[must_use]
    pub fn resolve(self, graph: &SignedGraph) -> Sign {
        match self {
            Self::Positive => Sign::Positive,
            Self::Negative => Sign::Negative,
            Self::Majority => majority_sign(graph),
        }
    }
}

impl FromStr for DefaultSign {
    type Err = SignedGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "majority" => Ok(Self::Majority),
            _ => Err(SignedGraphError::InvalidDefaultSign(s.to_string())),
        }
    }
}

impl fmt::Display for DefaultSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Majority => "majority",
        })
    }
}

/// Globally dominant sign: positive iff the summed edge weight is `> 0`.
#[must_use]
pub fn majority_sign(graph: &SignedGraph) -> Sign {
    Sign::from_weight(graph.total_weight())
}

/// Reject queries that name a node outside `0..node_count`.
pub(crate) fn check_queries(graph: &SignedGraph, queries: &[(usize, usize)]) -> Result<()> {
    let node_count = graph.node_count();
    for &(u, v) in queries {
        for index in [u, v] {
            if index >= node_count {
                return Err(SignedGraphError::NodeOutOfRange { index, node_count });
            }
        }
    }
    Ok(())
}
