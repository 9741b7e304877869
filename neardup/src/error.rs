//! Error types for neardup.

use thiserror::Error;

/// Errors raised while configuring or querying a [`MinHashEstimator`](crate::minhash::MinHashEstimator).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeardupError {
    /// At least one hash function is required.
    #[error("number of hashes must be at least 1")]
    ZeroHashes,

    /// More unique coefficients were requested than the coefficient range holds.
    #[error("cannot draw {requested} unique coefficients, at most {max} exist")]
    TooManyHashes { requested: usize, max: u64 },

    /// At least one trial is required to average estimates.
    #[error("number of trials must be at least 1")]
    ZeroTrials,

    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("document index {index} out of range for {num_docs} documents")]
    DocumentOutOfRange { index: usize, num_docs: usize },

    /// A similarity matrix built for a different number of documents.
    #[error("similarity matrix covers {found} documents, expected {expected}")]
    MatrixSizeMismatch { expected: usize, found: usize },

    /// A pair needs two distinct documents.
    #[error("document {0} cannot be paired with itself")]
    SameDocument(usize),
}

pub type Result<T> = std::result::Result<T, NeardupError>;
