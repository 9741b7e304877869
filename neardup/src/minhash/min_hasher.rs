use log::trace;
use rand::Rng;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::error::{NeardupError, Result};
use crate::minhash::coefficients::pick_random_coeffs;
use crate::text::ShingleSet;

/// Smallest prime greater than `MAX_SHINGLE_ID`.
pub const NEXT_PRIME: u64 = 4294967311;

/// Signature value of a document without shingles. Larger than any hash.
pub const EMPTY_SENTINEL: u64 = NEXT_PRIME + 1;

/// One min hash per hash function. Short signatures stay inline.
pub type Signature = SmallVec<[u64; 8]>;

/// Family of hash functions `h_k(x) = (a[k] * x + b[k]) mod NEXT_PRIME`.
///
/// A `LinearMinHasher` lives for one trial: every trial samples fresh
/// coefficients and drops them afterwards.
#[derive(Clone, Debug)]
pub struct LinearMinHasher {
    a: Vec<u64>,
    b: Vec<u64>,
    num_hashes: usize,
}

impl LinearMinHasher {
    /// Samples `num_hashes` unique `a` coefficients, then `num_hashes` unique `b` coefficients.
    pub fn new<R: Rng + ?Sized>(num_hashes: usize, rng: &mut R) -> Result<Self> {
        if num_hashes == 0 {
            return Err(NeardupError::ZeroHashes);
        }
        let a = pick_random_coeffs(rng, num_hashes)?;
        let b = pick_random_coeffs(rng, num_hashes)?;
        Ok(LinearMinHasher { a, b, num_hashes })
    }

    /// # Panics
    /// If `a` and `b` differ in length.
    pub fn from_coeffs(a: Vec<u64>, b: Vec<u64>) -> Self {
        assert_eq!(a.len(), b.len());
        let num_hashes = a.len();
        LinearMinHasher { a, b, num_hashes }
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    pub fn coeffs(&self) -> (&[u64], &[u64]) {
        (&self.a, &self.b)
    }

    /// Fits in u64: `a, x <= 2^32 - 1` so `a * x + b <= 2^64 - 2^32`.
    #[inline]
    fn hash(a: u64, b: u64, shingle: u32) -> u64 {
        (a * shingle as u64 + b) % NEXT_PRIME
    }

    /// Minimum of every hash function over the shingle set. An empty set
    /// yields [`EMPTY_SENTINEL`] in every position.
    pub fn create_signature(&self, shingles: &ShingleSet) -> Signature {
        self.a
            .iter()
            .zip(self.b.iter())
            .map(|(&a, &b)| {
                shingles
                    .iter()
                    .map(|&shingle| Self::hash(a, b, shingle))
                    .fold(EMPTY_SENTINEL, u64::min)
            })
            .collect()
    }

    pub fn bulk_create_signatures(&self, batch: &[ShingleSet]) -> Vec<Signature> {
        trace!("creating {} signatures of {} hashes", batch.len(), self.num_hashes);
        batch
            .par_iter()
            .map(|shingles| self.create_signature(shingles))
            .collect()
    }
}
