//! Confusion-matrix evaluation of sign predictions.

use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignedGraphError};
use crate::prediction::Sign;

/// Tally of predictions against ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Evaluate [`Sign`] predictions with [`Sign::Positive`] as the positive
    /// label.
    ///
    /// # Errors
    ///
    /// Returns [`SignedGraphError::LengthMismatch`] if the slices differ in
    /// length.
    pub fn from_signs(truth: &[Sign], predicted: &[Sign]) -> Result<Self> {
        confusion_matrix(truth, predicted, Sign::Positive)
    }

    /// Number of tallied pairs.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    /// `(tp + tn) / total`, `None` when nothing was tallied.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| (self.tp + self.tn) as f64 / total as f64)
    }
}

/// Build a confusion matrix with `positive` as the positive label and
/// `-positive` as the negative one.
///
/// Pairs where either value is neither label are skipped.
///
/// # Errors
///
/// Returns [`SignedGraphError::LengthMismatch`] if the slices differ in
/// length.
pub fn confusion_matrix<T>(truth: &[T], predicted: &[T], positive: T) -> Result<ConfusionMatrix>
where
    T: Copy + PartialEq + Neg<Output = T>,
{
    if truth.len() != predicted.len() {
        return Err(SignedGraphError::LengthMismatch {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }

    let negative = -positive;
    let mut cm = ConfusionMatrix::default();
    for (&t, &p) in truth.iter().zip(predicted) {
        if t == positive && p == positive {
            cm.tp += 1;
        } else if t == negative && p == negative {
            cm.tn += 1;
        } else if t == negative && p == positive {
            cm.fp += 1;
        } else if t == positive && p == negative {
            cm.fn_ += 1;
        }
    }
    Ok(cm)
}
