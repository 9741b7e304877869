mod shingles;

pub use self::shingles::{AsCharShingles, CharShingles};
pub use self::shingles::{shingle_docs, shingle_id, shingle_set, shingle_text};
pub use self::shingles::{ShingleSet, SHINGLE_SEPARATOR, SHINGLE_SIZE};
