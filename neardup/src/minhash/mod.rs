mod coefficients;
mod estimator;
mod min_hasher;
mod report;
mod triangle;

pub use self::coefficients::{pick_random_coeffs, MAX_SHINGLE_ID};
pub use self::estimator::{MinHashEstimator, MinHashParams, SimilarityMatrix};
pub use self::min_hasher::{LinearMinHasher, Signature, EMPTY_SENTINEL, NEXT_PRIME};
pub use self::report::{PairSimilarity, SimilarityReport};
pub use self::triangle::{num_pairs, triangle_index, TriangularArray};

use crate::text::ShingleSet;

/// Fraction of positions where two signatures agree.
///
/// Positions where both signatures hold [`EMPTY_SENTINEL`] carry no
/// information and never count as a match, so two shingle-less documents
/// have similarity `0.0`.
///
/// # Examples
///
/// ```
/// use neardup::minhash::compute_minhash_similarity;
///
/// let m1 = [1, 2, 3, 4, 5, 6];
/// let m2 = [1, 2, 3, 7, 5, 8];
/// assert!((compute_minhash_similarity(&m1, &m2) - 0.666).abs() < 0.01);
/// ```
///
/// # Panics
/// If the signatures differ in length.
pub fn compute_minhash_similarity(min_hashes_1: &[u64], min_hashes_2: &[u64]) -> f64 {
    assert_eq!(min_hashes_1.len(), min_hashes_2.len());
    let num_hashes = min_hashes_1.len();
    if num_hashes == 0 {
        return 0.0;
    }
    let matches: u64 = min_hashes_1
        .iter()
        .zip(min_hashes_2.iter())
        .map(|(h1, h2)| (h1 == h2 && *h1 != EMPTY_SENTINEL) as u64)
        .sum();
    (matches as f64) / (num_hashes as f64)
}

/// Exact Jaccard similarity `|A ∩ B| / |A ∪ B|`. An empty union gives `0.0`.
pub fn compute_jaccard_similarity(s1: &ShingleSet, s2: &ShingleSet) -> f64 {
    let intersection_len = s1.intersection(s2).count();
    let union_len = s1.len() + s2.len() - intersection_len;
    if union_len == 0 {
        return 0.0;
    }
    intersection_len as f64 / union_len as f64
}
