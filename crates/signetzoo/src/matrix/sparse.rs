//! Compressed sparse row (CSR) matrix used by every matrix view.
//!
//! Entries are kept sorted by `(row, col)` with at most one stored value per
//! position. A value that accumulates to exactly `0.0` during construction,
//! addition or multiplication is not stored, so `nnz` counts structural
//! non-zeros only.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Real-valued sparse matrix in CSR layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// All-zero matrix of the given shape.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_ptr: vec![0; rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(row, col, value)` triplets.
    ///
    /// Repeated positions are summed. Triplets outside the shape are ignored.
    #[must_use]
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut entries: Vec<(usize, usize, f64)> = triplets
            .into_iter()
            .filter(|&(r, c, _)| {
                debug_assert!(r < rows && c < cols, "triplet ({r}, {c}) out of bounds");
                r < rows && c < cols
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut merged: Vec<(usize, usize, f64)> = Vec::with_capacity(entries.len());
        for (r, c, v) in entries {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 += v,
                _ => merged.push((r, c, v)),
            }
        }

        let mut row_ptr = vec![0usize; rows + 1];
        let mut col_indices = Vec::with_capacity(merged.len());
        let mut values = Vec::with_capacity(merged.len());
        for (r, c, v) in merged {
            if v == 0.0 {
                continue;
            }
            row_ptr[r + 1] += 1;
            col_indices.push(c);
            values.push(v);
        }
        for i in 0..rows {
            row_ptr[i + 1] += row_ptr[i];
        }

        Self {
            rows,
            cols,
            row_ptr,
            col_indices,
            values,
        }
    }

    /// Square diagonal matrix. Zero diagonal values are not stored.
    #[must_use]
    pub fn diagonal(diag: &[f64]) -> Self {
        let n = diag.len();
        Self::from_triplets(n, n, diag.iter().enumerate().map(|(i, &v)| (i, i, v)))
    }

    /// `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at `(row, col)`; zero when not stored or out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows || col >= self.cols {
            return 0.0;
        }
        let (start, end) = (self.row_ptr[row], self.row_ptr[row + 1]);
        self.col_indices[start..end]
            .binary_search(&col)
            .map_or(0.0, |offset| self.values[start + offset])
    }

    /// Stored `(col, value)` pairs of one row.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let (start, end) = if row < self.rows {
            (self.row_ptr[row], self.row_ptr[row + 1])
        } else {
            (0, 0)
        };
        self.col_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// All stored `(row, col, value)` triplets in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |r| self.row(r).map(move |(c, v)| (r, c, v)))
    }

    /// Apply `f` to every stored value, keeping the sparsity pattern.
    #[must_use]
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            values: self.values.iter().map(|&v| f(v)).collect(),
            ..self.clone()
        }
    }

    /// Element-wise magnitude.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.map_values(f64::abs)
    }

    /// Transposed copy.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_triplets(self.cols, self.rows, self.iter().map(|(r, c, v)| (c, r, v)))
    }

    /// Element-wise sum. Both operands must share a shape.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.shape(), other.shape(), "shape mismatch in add");
        Self::from_triplets(self.rows, self.cols, self.iter().chain(other.iter()))
    }

    /// Sparse product `self · other` (row-by-row accumulation).
    #[must_use]
    pub fn matmul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.cols, other.rows, "inner dimension mismatch in matmul");
        let mut acc = vec![0.0_f64; other.cols];
        let mut touched = vec![false; other.cols];
        let mut cols_in_row: Vec<usize> = Vec::new();

        let mut row_ptr = vec![0usize; self.rows + 1];
        let mut col_indices = Vec::new();
        let mut values = Vec::new();

        for i in 0..self.rows {
            for (k, a) in self.row(i) {
                for (j, b) in other.row(k) {
                    if !touched[j] {
                        touched[j] = true;
                        cols_in_row.push(j);
                    }
                    acc[j] += a * b;
                }
            }
            cols_in_row.sort_unstable();
            for &j in &cols_in_row {
                if acc[j] != 0.0 {
                    col_indices.push(j);
                    values.push(acc[j]);
                }
                acc[j] = 0.0;
                touched[j] = false;
            }
            cols_in_row.clear();
            row_ptr[i + 1] = col_indices.len();
        }

        Self {
            rows: self.rows,
            cols: other.cols,
            row_ptr,
            col_indices,
            values,
        }
    }

    /// `y = self · x`.
    #[must_use]
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        (0..self.rows)
            .map(|r| self.row(r).map(|(c, v)| v * x[c]).sum())
            .collect()
    }

    /// `y = selfᵗ · x`, without materializing the transpose.
    #[must_use]
    pub fn transpose_mul_vec(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0_f64; self.cols];
        for (r, c, v) in self.iter() {
            y[c] += v * x[r];
        }
        y
    }

    /// Sum of each row.
    #[must_use]
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows).map(|r| self.row(r).map(|(_, v)| v).sum()).collect()
    }

    /// Sum of all entries.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// `Σ (self ⊙ other)`, the sum of the element-wise product.
    #[must_use]
    pub fn hadamard_sum(&self, other: &Self) -> f64 {
        self.iter().map(|(r, c, v)| v * other.get(r, c)).sum()
    }

    /// Exact symmetry check (`self[i,j] == self[j,i]` for all stored entries).
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_symmetric(&self) -> bool {
        self.rows == self.cols && self.iter().all(|(r, c, v)| self.get(c, r) == v)
    }

    /// Dense copy for the decompositions in [`crate::prediction::spectral`].
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.rows, self.cols);
        for (r, c, v) in self.iter() {
            dense[(r, c)] = v;
        }
        dense
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
