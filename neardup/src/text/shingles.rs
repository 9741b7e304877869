use fnv::FnvHashSet;
use itertools::Itertools;

/// Number of characters in one shingle.
pub const SHINGLE_SIZE: usize = 3;

/// Characters of a shingle are joined with this separator before checksumming.
pub const SHINGLE_SEPARATOR: &str = " ";

/// Set of CRC32 shingle ids of one document.
pub type ShingleSet = FnvHashSet<u32>;

/// CharShingles produces overlapping windows of `size` characters.
/// Windows always end on char boundaries, so multi-byte text such as
/// Chinese is split per character, not per byte.
#[derive(Clone)]
pub struct CharShingles<'a> {
    data: &'a str,
    size: usize,
}

impl<'a> CharShingles<'a> {
    pub fn new(data: &'a str, size: usize) -> Self {
        CharShingles { data, size }
    }
}

impl<'a> Iterator for CharShingles<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        // byte offset right after the last char of the window
        let pos_end = match self.data.char_indices().nth(self.size - 1) {
            Some((i, c)) => i + c.len_utf8(),
            None => {
                self.data = &self.data[self.data.len()..];
                return None;
            }
        };
        let pos_next = self.data.chars().next().map_or(0, char::len_utf8);
        let ret = &self.data[..pos_end];
        self.data = &self.data[pos_next..];
        Some(ret)
    }
}

pub trait AsCharShingles<'a> {
    fn as_char_shingles(&'a self, size: usize) -> CharShingles<'a>;
}

impl<'a> AsCharShingles<'a> for str {
    fn as_char_shingles(&'a self, size: usize) -> CharShingles<'a> {
        CharShingles::new(self, size)
    }
}

/// Checksum of a single shingle: its characters joined by [`SHINGLE_SEPARATOR`],
/// encoded as UTF-8 and hashed with CRC32.
pub fn shingle_id(shingle: &str) -> u32 {
    let joined = shingle.chars().join(SHINGLE_SEPARATOR);
    crc32fast::hash(joined.as_bytes())
}

/// Shingle ids of every window of `text`, in order and with repeats.
pub fn shingle_text(text: &str) -> impl Iterator<Item = u32> + '_ {
    text.as_char_shingles(SHINGLE_SIZE).map(shingle_id)
}

/// Deduplicated shingle ids of `text`. Texts shorter than [`SHINGLE_SIZE`]
/// characters give an empty set.
pub fn shingle_set(text: &str) -> ShingleSet {
    shingle_text(text).collect()
}

/// Shingle sets of all documents, indexed by document position.
pub fn shingle_docs<S: AsRef<str>>(docs: &[S]) -> Vec<ShingleSet> {
    docs.iter().map(|doc| shingle_set(doc.as_ref())).collect()
}
