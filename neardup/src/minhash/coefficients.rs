use fnv::FnvHashSet;
use log::trace;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{NeardupError, Result};

/// Largest shingle id. Coefficients are drawn from `0..=MAX_SHINGLE_ID`.
pub const MAX_SHINGLE_ID: u64 = (1 << 32) - 1;

/// Draws `k` pairwise distinct coefficients uniformly from `0..=MAX_SHINGLE_ID`.
/// A draw that repeats an earlier value is rejected and redrawn, so the output
/// order follows the order of accepted draws.
pub fn pick_random_coeffs<R: Rng + ?Sized>(rng: &mut R, k: usize) -> Result<Vec<u64>> {
    let max = MAX_SHINGLE_ID + 1;
    if k as u64 > max {
        return Err(NeardupError::TooManyHashes { requested: k, max });
    }
    let range = Uniform::new_inclusive(0, MAX_SHINGLE_ID);
    let mut seen = FnvHashSet::with_capacity_and_hasher(k, Default::default());
    let mut coeffs = Vec::with_capacity(k);
    let mut draws = 0usize;
    while coeffs.len() < k {
        let candidate = range.sample(rng);
        draws += 1;
        if seen.insert(candidate) {
            coeffs.push(candidate);
        }
    }
    trace!("picked {} coefficients in {} draws", k, draws);
    Ok(coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_coeffs_unique_and_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        let coeffs = pick_random_coeffs(&mut rng, 1000).unwrap();
        assert_eq!(coeffs.len(), 1000);
        let unique: HashSet<_> = coeffs.iter().collect();
        assert_eq!(unique.len(), 1000);
        assert!(coeffs.iter().all(|c| *c <= MAX_SHINGLE_ID));
    }

    #[test]
    fn test_coeffs_deterministic_for_seed() {
        let a = pick_random_coeffs(&mut StdRng::seed_from_u64(42), 16).unwrap();
        let b = pick_random_coeffs(&mut StdRng::seed_from_u64(42), 16).unwrap();
        let c = pick_random_coeffs(&mut StdRng::seed_from_u64(43), 16).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_coeffs() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_random_coeffs(&mut rng, 0).unwrap().is_empty());
    }
}
