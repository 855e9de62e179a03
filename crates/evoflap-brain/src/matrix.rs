//! Weight matrices for controller layers.
//!
//! A [`WeightMatrix`] is an owned, row-major `rows × cols` block of `f64`. It
//! implements [`Clone`] as a deep copy, so two controllers never share weight
//! storage. The only way to obtain different weights from an existing matrix is
//! [`WeightMatrix::mutated`], which returns a new matrix.
//!
//! # Operations
//!
//! - **Initialization**: [`WeightMatrix::random`] draws every entry uniformly from a [`WeightRange`]
//! - **Mutation**: [`WeightMatrix::mutated`] copies and perturbs entries according to a [`Mutation`]
//! - **Evaluation**: [`WeightMatrix::mul_vec`] computes the matrix-vector product

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed interval every weight must stay in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
        }
    }
}

impl WeightRange {
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn sample<R>(&self, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        rng.random_range(self.min..=self.max)
    }
}

/// Per-weight mutation applied when an offspring is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Probability that any single weight is redrawn.
    pub rate: f64,
    /// Maximum distance a redrawn weight may move from its inherited value.
    pub change: f64,
}

/// Row-major matrix of network weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl WeightMatrix {
    /// Builds a matrix by calling `f(row, col)` for every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use evoflap_brain::matrix::WeightMatrix;
    ///
    /// let identity = WeightMatrix::from_fn(2, 2, |r, c| if r == c { 1.0 } else { 0.0 });
    /// assert_eq!(identity.mul_vec(&[3.0, 4.0]), vec![3.0, 4.0]);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self { rows, cols, values }
    }

    /// Creates a matrix whose entries are drawn independently and uniformly from `range`.
    pub fn random<R>(rows: usize, cols: usize, range: WeightRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(rows, cols, |_, _| range.sample(rng))
    }

    /// Returns a deep copy in which each entry is independently redrawn with
    /// probability `mutation.rate`.
    ///
    /// A redrawn entry `w` is sampled uniformly from
    /// `[max(range.min, w - change), min(range.max, w + change)]`, with `w` first
    /// clamped into `range`. Entries that are not selected are carried over bit
    /// for bit.
    #[must_use]
    pub fn mutated<R>(&self, mutation: Mutation, range: WeightRange, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let values = self
            .values
            .iter()
            .map(|&w| {
                if rng.random_bool(mutation.rate) {
                    let w = w.clamp(range.min, range.max);
                    let lower = f64::max(w - mutation.change, range.min);
                    let upper = f64::min(w + mutation.change, range.max);
                    rng.random_range(lower..=upper)
                } else {
                    w
                }
            })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            values,
        }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// All entries in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Computes `self · input`.
    ///
    /// # Panics
    ///
    /// Panics if `input.len()` differs from the number of columns.
    #[must_use]
    pub fn mul_vec(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(
            self.cols,
            input.len(),
            "input length must match matrix columns"
        );
        self.values
            .chunks_exact(self.cols)
            .map(|row| row.iter().zip(input).map(|(w, x)| w * x).sum())
            .collect()
    }
}
