//! `library`: the master word list and its pattern index.
//!
//! On load, every word of length L is inserted into the index under all 2^L
//! *patterns* of itself: each subset of its positions masked to the wildcard
//! `.`. A slot pattern like `C.T` is then answered with one hash probe, and
//! membership (`is_word`) is the probe for the all-letters mask.
//!
//! The 2^L expansion is affordable only because word length is capped: the
//! cap is the grid's largest dimension, clamped to [`MAX_INDEXED_LEN`]. A
//! 25-letter word would cost 2^25 bucket insertions, so anything past the
//! clamp is skipped and counted rather than indexed.
//!
//! Word list format: one word per line, case-insensitive, trailing
//! whitespace and `\r` stripped. Lines that normalize to something other
//! than `A`-`Z` letters are skipped and counted, never fatal.

use std::collections::HashMap;
use std::io;

/// Identifier of a word: its index in the master list.
pub type WordId = usize;

/// Hard cap on indexed word length. 2^16 patterns per word is the most we
/// are willing to precompute.
pub const MAX_INDEXED_LEN: usize = 16;

/// The wildcard character in a pattern.
pub const WILDCARD: char = '.';

/// Per-category line counts from one load, reported when loading finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Words accepted and indexed.
    pub kept: usize,
    /// Lines with a non-letter character after uppercasing.
    pub malformed: usize,
    /// Words longer than the length cap.
    pub oversized: usize,
    /// Words shorter than the configured minimum.
    pub undersized: usize,
    /// Repeats of an already-loaded word.
    pub duplicates: usize,
}

/// The loaded dictionary. Immutable once built, so the search (or several
/// parallel searches) can share it freely.
#[derive(Debug, Default)]
pub struct Library {
    words: Vec<String>,
    buckets: HashMap<String, Vec<WordId>>,
    stats: LoadStats,
}

impl Library {
    /// Parse a word list from an in-memory string.
    ///
    /// `min_len` answers the single-letter-span question: pass 1 to accept
    /// 1-letter words if the list has them, 2+ to drop them. `max_len` is
    /// normally the grid's max dimension; values above [`MAX_INDEXED_LEN`]
    /// are clamped with a warning.
    #[must_use]
    pub fn parse_from_str(contents: &str, min_len: usize, max_len: usize) -> Library {
        let max_len = if max_len > MAX_INDEXED_LEN {
            log::warn!(
                "length cap {max_len} would explode the pattern index; clamping to {MAX_INDEXED_LEN}"
            );
            MAX_INDEXED_LEN
        } else {
            max_len
        };

        let mut library = Library::default();
        for raw_line in contents.lines() {
            let line = raw_line.trim_end();
            if line.is_empty() {
                continue;
            }
            let word = line.to_ascii_uppercase();
            if !word.chars().all(|ch| ch.is_ascii_uppercase()) {
                library.stats.malformed += 1;
                continue;
            }
            if word.len() > max_len {
                library.stats.oversized += 1;
                continue;
            }
            if word.len() < min_len {
                library.stats.undersized += 1;
                continue;
            }
            if library.is_word(&word) {
                library.stats.duplicates += 1;
                continue;
            }
            library.insert(word);
        }

        let stats = library.stats;
        log::info!(
            "loaded {} words ({} malformed, {} oversized, {} undersized, {} duplicate lines skipped)",
            stats.kept,
            stats.malformed,
            stats.oversized,
            stats.undersized,
            stats.duplicates
        );

        library
    }

    /// Read a word list from a file and parse it.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(
        path: P,
        min_len: usize,
        max_len: usize,
    ) -> io::Result<Library> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {e}", path_ref.display()),
            )
        })?;
        Ok(Self::parse_from_str(&data, min_len, max_len))
    }

    // Pattern precomputation: index the word under every mask of its
    // positions. Bit j of the mask selects whether position j is wildcarded.
    fn insert(&mut self, word: String) {
        let id: WordId = self.words.len();
        let len = word.len();
        let bytes = word.as_bytes();

        for mask in 0u32..(1u32 << len) {
            let mut pattern = String::with_capacity(len);
            for (j, &b) in bytes.iter().enumerate() {
                if (mask >> j) & 1 == 1 {
                    pattern.push(WILDCARD);
                } else {
                    pattern.push(b as char);
                }
            }
            self.buckets.entry(pattern).or_default().push(id);
        }

        self.words.push(word);
        self.stats.kept += 1;
    }

    /// All words matching `pattern` (letters fixed, `.` free), or `None` if
    /// no word matches. Patterns of different lengths cannot collide, so the
    /// length check is implicit. Bucket order is word-list load order.
    #[must_use]
    pub fn find_matches(&self, pattern: &str) -> Option<&[WordId]> {
        self.buckets.get(pattern).map(Vec::as_slice)
    }

    /// Whether `s` is a loaded word. `s` must be all letters; the all-letters
    /// mask of every word is indexed, so membership is one bucket probe.
    #[must_use]
    pub fn is_word(&self, s: &str) -> bool {
        self.buckets.contains_key(s)
    }

    /// The word behind an id returned by [`Library::find_matches`].
    #[must_use]
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Word count per length, indexed by length. For diagnostics.
    #[must_use]
    pub fn counts_by_len(&self) -> Vec<usize> {
        let max = self.words.iter().map(String::len).max().unwrap_or(0);
        let mut counts = vec![0usize; max + 1];
        for word in &self.words {
            counts[word.len()] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic() {
        let library = Library::parse_from_str("cat\ndog\n", 1, 15);
        assert_eq!(library.len(), 2);
        assert!(library.is_word("CAT"));
        assert!(library.is_word("DOG"));
        assert!(!library.is_word("BIRD"));
    }

    #[test]
    fn test_load_folds_case_and_strips_whitespace() {
        let library = Library::parse_from_str("Cat  \nDOG\r\n", 1, 15);
        assert!(library.is_word("CAT"));
        assert!(library.is_word("DOG"));
        assert_eq!(library.stats().malformed, 0);
    }

    #[test]
    fn test_load_skips_malformed_words() {
        let library = Library::parse_from_str("cat\nna'am\nc3po\ndog\n", 1, 15);
        assert_eq!(library.len(), 2);
        assert_eq!(library.stats().malformed, 2);
    }

    #[test]
    fn test_load_skips_oversized_words() {
        let library = Library::parse_from_str("cat\nhouseboat\n", 1, 5);
        assert_eq!(library.len(), 1);
        assert_eq!(library.stats().oversized, 1);
    }

    #[test]
    fn test_load_skips_undersized_words() {
        let library = Library::parse_from_str("a\nat\ncat\n", 3, 15);
        assert_eq!(library.len(), 1);
        assert_eq!(library.stats().undersized, 2);
    }

    #[test]
    fn test_load_deduplicates() {
        let library = Library::parse_from_str("cat\nCAT\ncat\n", 1, 15);
        assert_eq!(library.len(), 1);
        assert_eq!(library.stats().duplicates, 2);
    }

    #[test]
    fn test_length_cap_is_clamped() {
        // 17 letters: one past the indexing cap
        let library = Library::parse_from_str("abcdefghijklmnopq\ncat\n", 1, 25);
        assert_eq!(library.len(), 1);
        assert_eq!(library.stats().oversized, 1);
    }

    #[test]
    fn test_pattern_index_sanity() {
        let library = Library::parse_from_str("cat\n", 1, 15);
        for pattern in ["CAT", "C.T", ".A.", "...", "CA.", ".AT", "C..", "..T"] {
            let matches = library.find_matches(pattern).unwrap();
            assert_eq!(matches, &[0], "pattern {pattern} should match CAT");
        }
        // wrong length is simply not a key
        assert!(library.find_matches("C.").is_none());
        assert!(library.find_matches("CAT.").is_none());
    }

    #[test]
    fn test_pattern_index_is_complete() {
        // every mask of every word maps back to it
        let words = ["it", "cat", "toad"];
        let library = Library::parse_from_str(&words.join("\n"), 1, 15);
        for (id, word) in words.iter().enumerate() {
            let upper = word.to_ascii_uppercase();
            for mask in 0u32..(1 << word.len()) {
                let pattern: String = upper
                    .chars()
                    .enumerate()
                    .map(|(j, ch)| if (mask >> j) & 1 == 1 { WILDCARD } else { ch })
                    .collect();
                let matches = library.find_matches(&pattern).unwrap();
                assert!(matches.contains(&id), "mask {mask:b} of {word} lost");
            }
        }
    }

    #[test]
    fn test_bucket_order_is_load_order() {
        let library = Library::parse_from_str("cot\ncat\ncut\n", 1, 15);
        assert_eq!(library.find_matches("C.T").unwrap(), &[0, 1, 2]);
        assert_eq!(library.word(1), "CAT");
    }

    #[test]
    fn test_counts_by_len() {
        let library = Library::parse_from_str("a\ncat\ndog\ntoad\n", 1, 15);
        let counts = library.counts_by_len();
        assert_eq!(counts[1], 1);
        assert_eq!(counts[3], 2);
        assert_eq!(counts[4], 1);
        assert_eq!(counts[2], 0);
    }

    #[test]
    fn test_empty_input() {
        let library = Library::parse_from_str("", 1, 15);
        assert!(library.is_empty());
        assert_eq!(library.stats(), LoadStats::default());
    }
}
