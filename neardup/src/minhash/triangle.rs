//! Flat storage for symmetric pairwise values.
//!
//! Only one slot exists per unordered pair `{i, j}`, `i != j`, so `n` documents
//! need `n * (n - 1) / 2` slots. Row `i` holds the pairs `(i, i+1) .. (i, n-1)`
//! and starts after the `i * (2n - i - 1) / 2` slots used by rows `0..i`, which
//! gives the offset
//!
//! ```text
//! k(i, j) = i * (n - (i + 1) / 2) - 1 + j - i        (i < j, real valued)
//!         = i * (2n - i - 1) / 2 + (j - i - 1)       (integer form)
//! ```
//!
//! `i * (2n - i - 1)` is always even, so the integer form is exact. Within a
//! row the offset grows by one per `j`, and the last slot of row `i` is one
//! below the first slot of row `i + 1`, which makes `k` a bijection onto
//! `0..n * (n - 1) / 2`.

use std::ops::{AddAssign, DivAssign};

use crate::error::{NeardupError, Result};

/// Number of unordered pairs among `num_docs` documents.
pub fn num_pairs(num_docs: usize) -> usize {
    num_docs * num_docs.saturating_sub(1) / 2
}

/// Flat offset of the unordered pair `{i, j}`.
pub fn triangle_index(i: usize, j: usize, num_docs: usize) -> Result<usize> {
    if i == j {
        return Err(NeardupError::SameDocument(i));
    }
    let (i, j) = if j < i { (j, i) } else { (i, j) };
    if j >= num_docs {
        return Err(NeardupError::DocumentOutOfRange { index: j, num_docs });
    }
    Ok(i * (2 * num_docs - i - 1) / 2 + (j - i - 1))
}

/// Values for every unordered pair of `num_docs` documents.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangularArray<T> {
    values: Vec<T>,
    num_docs: usize,
}

impl<T: Copy + Default> TriangularArray<T> {
    pub fn new(num_docs: usize) -> Self {
        TriangularArray {
            values: vec![T::default(); num_pairs(num_docs)],
            num_docs,
        }
    }
}

impl<T: Copy> TriangularArray<T> {
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T> {
        let k = triangle_index(i, j, self.num_docs)?;
        Ok(self.values[k])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Pairs `(i, j, value)` with `i < j`, ordered by `i` then `j`.
    /// That order is the storage order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        let n = self.num_docs;
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .zip(self.values.iter())
            .map(|((i, j), value)| (i, j, *value))
    }
}

impl<T: Copy + AddAssign> TriangularArray<T> {
    pub fn add(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let k = triangle_index(i, j, self.num_docs)?;
        self.values[k] += value;
        Ok(())
    }

    /// Element-wise sum with an array of the same shape.
    ///
    /// # Panics
    /// If the arrays hold a different number of documents.
    pub fn merge(&mut self, other: &TriangularArray<T>) {
        assert_eq!(self.num_docs, other.num_docs);
        for (value, other) in self.values.iter_mut().zip(other.values.iter()) {
            *value += *other;
        }
    }
}

impl<T: Copy + DivAssign> TriangularArray<T> {
    pub fn divide_all(&mut self, divisor: T) {
        for value in self.values.iter_mut() {
            *value /= divisor;
        }
    }
}
