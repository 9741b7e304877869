/*!
This library estimates pairwise [Jaccard similarity](https://en.wikipedia.org/wiki/Jaccard_index)
of short text documents with [MinHash](https://en.wikipedia.org/wiki/MinHash).

Documents are split into overlapping 3-character shingles, so text without
whitespace-delimited words, such as Chinese, works out of the box. MinHash on a
handful of shingles is noisy, so the estimator repeats the estimate over several
independent draws of hash coefficients and averages the results.

Main use case is near-duplicate detection in small collections.


## Example

 ```
 use neardup::minhash::{MinHashEstimator, MinHashParams};

 let docs = [
     "我们在这类非常开心",
     "我们在这里非常开心",
     "如果记忆能被定格，你的高中会是怎样的一幅画？高考开始，愿你全力以赴大胜归来！",
     "如果记忆能被定格，你的高中会是怎样的？高考开始，全力以赴大胜归来！"];
 let params = MinHashParams::default().with_num_hashes(64);
 let estimator = MinHashEstimator::new(docs, params).unwrap();
 let matrix = estimator.par_run_trials(7).unwrap();
 let report = estimator.report(&matrix).unwrap();
 assert_eq!(report.len(), 6);
 for pair in report.pairs() {
     assert!((pair.estimated - pair.exact).abs() < 0.25);
 }
 print!("{}", report);
 ```

## References
[[1] Chapter 3, Mining of Massive Datasets](http://www.mmds.org)

 */

pub mod error;
pub mod minhash;
pub mod text;

pub use self::error::{NeardupError, Result};
