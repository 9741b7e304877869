use std::fmt;

use itertools::Itertools;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::error::{NeardupError, Result};
use crate::minhash::coefficients::MAX_SHINGLE_ID;
use crate::minhash::min_hasher::LinearMinHasher;
use crate::minhash::report::SimilarityReport;
use crate::minhash::triangle::{num_pairs, TriangularArray};
use crate::minhash::{compute_jaccard_similarity, compute_minhash_similarity};
use crate::text::{shingle_docs, ShingleSet};

/// Estimated similarity per unordered document pair.
pub type SimilarityMatrix = TriangularArray<f64>;

#[derive(Clone, Debug, PartialEq)]
pub struct MinHashParams {
    /// Hash functions per signature.
    pub num_hashes: usize,
    /// Independent coefficient draws averaged into the final estimate.
    pub num_trials: usize,
    /// Cutoff for [`SimilarityReport::above_threshold`]. Not used by the estimate itself.
    pub threshold: f64,
}

impl Default for MinHashParams {
    fn default() -> Self {
        MinHashParams {
            num_hashes: 5,
            num_trials: 10,
            threshold: 0.5,
        }
    }
}

impl MinHashParams {
    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_num_trials(mut self, num_trials: usize) -> Self {
        self.num_trials = num_trials;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_hashes == 0 {
            return Err(NeardupError::ZeroHashes);
        }
        if self.num_hashes as u64 > MAX_SHINGLE_ID + 1 {
            return Err(NeardupError::TooManyHashes {
                requested: self.num_hashes,
                max: MAX_SHINGLE_ID + 1,
            });
        }
        if self.num_trials == 0 {
            return Err(NeardupError::ZeroTrials);
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(NeardupError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Estimates pairwise Jaccard similarity of short documents with MinHash.
///
/// Shingle sets are extracted once at construction. Every trial draws new
/// hash coefficients, signs all documents and scores every pair; the final
/// estimate of a pair is its mean score over all trials.
///
/// # Examples
///
/// ```
/// use neardup::minhash::{MinHashEstimator, MinHashParams};
///
/// let docs = ["我们在这类非常开心", "我们在这里非常开心", "今天天气很好"];
/// let estimator = MinHashEstimator::new(docs, MinHashParams::default()).unwrap();
/// let matrix = estimator.par_run_trials(42).unwrap();
/// assert_eq!(matrix.len(), 3);
/// assert_eq!(matrix.get(0, 2).unwrap(), 0.0);
/// ```
pub struct MinHashEstimator {
    params: MinHashParams,
    docs: Vec<String>,
    shingle_sets: Vec<ShingleSet>,
}

impl fmt::Display for MinHashEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MinHashEstimator {{ num_docs = {}, num_hashes = {}, num_trials = {}, threshold = {} }}",
               self.num_docs(), self.params.num_hashes, self.params.num_trials, self.params.threshold)
    }
}

impl MinHashEstimator {
    pub fn new<I, S>(docs: I, params: MinHashParams) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        params.validate()?;
        let docs: Vec<String> = docs.into_iter().map(Into::into).collect();
        let shingle_sets = shingle_docs(&docs);
        let estimator = MinHashEstimator { params, docs, shingle_sets };
        info!("created {}", estimator);
        Ok(estimator)
    }

    pub fn params(&self) -> &MinHashParams {
        &self.params
    }

    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    pub fn shingle_sets(&self) -> &[ShingleSet] {
        &self.shingle_sets
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    /// Number of unordered document pairs.
    pub fn num_elems(&self) -> usize {
        num_pairs(self.num_docs())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.num_docs() {
            return Err(NeardupError::DocumentOutOfRange { index, num_docs: self.num_docs() });
        }
        Ok(())
    }

    /// Exact Jaccard similarity of the shingle sets of documents `i` and `j`.
    pub fn exact_jaccard(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(compute_jaccard_similarity(&self.shingle_sets[i], &self.shingle_sets[j]))
    }

    /// Scores of one trial, not yet averaged.
    fn score_trial(&self, min_hasher: &LinearMinHasher) -> Result<SimilarityMatrix> {
        let signatures = min_hasher.bulk_create_signatures(&self.shingle_sets);
        let mut scores = SimilarityMatrix::new(self.num_docs());
        for (i, j) in (0..self.num_docs()).tuple_combinations() {
            scores.add(i, j, compute_minhash_similarity(&signatures[i], &signatures[j]))?;
        }
        Ok(scores)
    }

    /// Runs one trial with coefficients drawn from `rng`.
    pub fn run_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimilarityMatrix> {
        let min_hasher = LinearMinHasher::new(self.params.num_hashes, rng)?;
        self.score_trial(&min_hasher)
    }

    /// Runs all trials one after another, drawing coefficients from `rng` in trial order.
    pub fn run_trials<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SimilarityMatrix> {
        let mut totals = SimilarityMatrix::new(self.num_docs());
        for trial in 0..self.params.num_trials {
            totals.merge(&self.run_trial(&mut *rng)?);
            debug!("finished trial {} of {}", trial + 1, self.params.num_trials);
        }
        totals.divide_all(self.params.num_trials as f64);
        Ok(totals)
    }

    /// Runs trials on the rayon pool. Each trial gets its own `Pcg64` seeded from a
    /// master `Pcg64`, and trial scores are summed in trial order, so the result
    /// depends on `seed` only.
    pub fn par_run_trials(&self, seed: u64) -> Result<SimilarityMatrix> {
        let mut master = Pcg64::seed_from_u64(seed);
        let trial_seeds: Vec<u64> = (0..self.params.num_trials).map(|_| master.gen()).collect();
        let trial_scores = trial_seeds
            .par_iter()
            .map(|&trial_seed| self.run_trial(&mut Pcg64::seed_from_u64(trial_seed)))
            .collect::<Result<Vec<_>>>()?;
        debug!("finished {} trials with seed {}", trial_scores.len(), seed);

        let mut totals = SimilarityMatrix::new(self.num_docs());
        for scores in trial_scores.iter() {
            totals.merge(scores);
        }
        totals.divide_all(self.params.num_trials as f64);
        Ok(totals)
    }

    /// Like [`par_run_trials`](Self::par_run_trials) with a seed taken from the thread rng.
    pub fn estimate(&self) -> Result<SimilarityMatrix> {
        self.par_run_trials(rand::thread_rng().gen())
    }

    /// Every pair with its estimate and exact Jaccard similarity.
    pub fn report<'a>(&'a self, matrix: &SimilarityMatrix) -> Result<SimilarityReport<'a>> {
        SimilarityReport::new(self, matrix)
    }

    /// Pairs whose estimate reaches the configured threshold.
    pub fn threshold_report<'a>(&'a self, matrix: &SimilarityMatrix) -> Result<SimilarityReport<'a>> {
        Ok(self.report(matrix)?.above_threshold(self.params.threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    static DOCS: [&str; 4] = [
        "我们在这类非常开心",
        "我们在这里非常开心",
        "如果记忆能被定格，你的高中会是怎样的一幅画？高考开始，愿你全力以赴大胜归来！",
        "如果记忆能被定格，你的高中会是怎样的？高考开始，全力以赴大胜归来！",
    ];

    #[test]
    fn test_params_validation() {
        assert!(MinHashParams::default().validate().is_ok());
        assert_eq!(MinHashParams::default().with_num_hashes(0).validate(), Err(NeardupError::ZeroHashes));
        assert_eq!(MinHashParams::default().with_num_trials(0).validate(), Err(NeardupError::ZeroTrials));
        assert!(matches!(
            MinHashParams::default().with_threshold(1.5).validate(),
            Err(NeardupError::InvalidThreshold(_))
        ));
        assert!(matches!(
            MinHashParams::default().with_threshold(f64::NAN).validate(),
            Err(NeardupError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let estimator = MinHashEstimator::new(DOCS, MinHashParams::default()).unwrap();
        assert_eq!(estimator.num_docs(), 4);
        assert_eq!(estimator.num_elems(), 6);
        assert_eq!(estimator.shingle_sets()[0].len(), 7);
        println!("{}", estimator);
    }

    #[test]
    fn test_estimates_near_exact() {
        let params = MinHashParams::default().with_num_hashes(128).with_num_trials(10);
        let estimator = MinHashEstimator::new(DOCS, params).unwrap();
        let matrix = estimator.par_run_trials(3).unwrap();
        for (i, j, estimated) in matrix.pairs() {
            let exact = estimator.exact_jaccard(i, j).unwrap();
            println!("({}, {}) actual {} estimated {}", i, j, exact, estimated);
            assert!((estimated - exact).abs() < 0.1);
        }
    }

    #[test]
    fn test_identical_docs_always_match() {
        let params = MinHashParams::default().with_num_trials(3);
        let estimator = MinHashEstimator::new(["aaaa", "aaaa"], params).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5 {
            assert_eq!(estimator.run_trial(&mut rng).unwrap().get(0, 1).unwrap(), 1.0);
        }
        assert_eq!(estimator.run_trials(&mut rng).unwrap().get(0, 1).unwrap(), 1.0);
        assert_eq!(estimator.exact_jaccard(0, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_disjoint_single_shingles() {
        let params = MinHashParams::default().with_num_trials(50);
        let estimator = MinHashEstimator::new(["abc", "abd"], params).unwrap();
        assert_eq!(estimator.exact_jaccard(0, 1).unwrap(), 0.0);
        let estimate = estimator.par_run_trials(5).unwrap().get(0, 1).unwrap();
        assert!(estimate < 0.05);
    }

    #[test]
    fn test_short_docs_no_match() {
        let estimator = MinHashEstimator::new(["ab", "ab", "abc"], MinHashParams::default()).unwrap();
        let matrix = estimator.par_run_trials(1).unwrap();
        assert_eq!(matrix.get(0, 1).unwrap(), 0.0);
        assert_eq!(matrix.get(0, 2).unwrap(), 0.0);
        assert_eq!(estimator.exact_jaccard(0, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_fewer_than_two_docs() {
        let none: [&str; 0] = [];
        let estimator = MinHashEstimator::new(none, MinHashParams::default()).unwrap();
        assert!(estimator.estimate().unwrap().is_empty());

        let estimator = MinHashEstimator::new(["only one"], MinHashParams::default()).unwrap();
        let matrix = estimator.run_trials(&mut StdRng::seed_from_u64(1)).unwrap();
        assert!(matrix.is_empty());
        assert!(estimator.report(&matrix).unwrap().is_empty());
    }

    #[test]
    fn test_seed_determinism() {
        let estimator = MinHashEstimator::new(DOCS, MinHashParams::default()).unwrap();
        assert_eq!(estimator.par_run_trials(17).unwrap(), estimator.par_run_trials(17).unwrap());
        assert_eq!(
            estimator.run_trials(&mut StdRng::seed_from_u64(17)).unwrap(),
            estimator.run_trials(&mut StdRng::seed_from_u64(17)).unwrap()
        );
    }

    #[test]
    fn test_exact_jaccard_out_of_range() {
        let estimator = MinHashEstimator::new(DOCS, MinHashParams::default()).unwrap();
        assert_eq!(
            estimator.exact_jaccard(0, 4),
            Err(NeardupError::DocumentOutOfRange { index: 4, num_docs: 4 })
        );
    }
}
