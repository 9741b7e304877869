use std::fmt;

use crate::error::{NeardupError, Result};
use crate::minhash::estimator::{MinHashEstimator, SimilarityMatrix};

/// Estimated and exact similarity of one document pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PairSimilarity<'a> {
    pub left_index: usize,
    pub right_index: usize,
    pub left: &'a str,
    pub right: &'a str,
    pub estimated: f64,
    pub exact: f64,
}

impl fmt::Display for PairSimilarity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {:>5} --> {:>5}  minhash similarity: {:.2}  jaccard similarity: {:.2}",
               self.left, self.right, self.estimated, self.exact)
    }
}

/// All document pairs `(i, j)`, `i < j`, in index order.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityReport<'a> {
    pairs: Vec<PairSimilarity<'a>>,
}

impl<'a> SimilarityReport<'a> {
    pub fn new(estimator: &'a MinHashEstimator, matrix: &SimilarityMatrix) -> Result<Self> {
        if matrix.num_docs() != estimator.num_docs() {
            return Err(NeardupError::MatrixSizeMismatch {
                expected: estimator.num_docs(),
                found: matrix.num_docs(),
            });
        }
        let docs = estimator.docs();
        let pairs = matrix
            .pairs()
            .map(|(i, j, estimated)| {
                let exact = estimator.exact_jaccard(i, j)?;
                Ok(PairSimilarity {
                    left_index: i,
                    right_index: j,
                    left: docs[i].as_str(),
                    right: docs[j].as_str(),
                    estimated,
                    exact,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SimilarityReport { pairs })
    }

    pub fn pairs(&self) -> &[PairSimilarity<'a>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Keeps the pairs whose estimate is at least `threshold`.
    pub fn above_threshold(self, threshold: f64) -> Self {
        SimilarityReport {
            pairs: self
                .pairs
                .into_iter()
                .filter(|pair| pair.estimated >= threshold)
                .collect(),
        }
    }
}

impl fmt::Display for SimilarityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in self.pairs.iter() {
            writeln!(f, "{}", pair)?;
        }
        Ok(())
    }
}
