//! Dictionary used by the move search
//!
//! Answers "is this a complete word" and "can this be extended into a word"
//! in O(1). Both queries are memoized per dictionary instance; the caches are
//! concurrent maps so parallel searches can share one dictionary by reference.
//! `Solver::legal_moves` clears them after every board.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};

use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashSet};

/// Letters tried when substituting a tile's letter
pub const ALPHABET: [u8; 26] = *b"abcdefghijklmnopqrstuvwxyz";

type QueryCache = DashMap<String, bool, FxBuildHasher>;

/// A fixed word list with word and prefix lookup
///
/// Words are stored lowercase; queries are matched against the exact string
/// given, so callers pass lowercase text.
pub struct Dictionary {
    words: FxHashSet<String>,
    prefixes: FxHashSet<String>,
    word_cache: QueryCache,
    prefix_cache: QueryCache,
}

impl Dictionary {
    /// Build a dictionary from a list of words
    ///
    /// Words are lowercased; empty entries and entries containing anything
    /// other than ASCII letters are skipped. Every prefix of every word
    /// (including the word itself) becomes a valid prefix.
    ///
    /// # Examples
    /// ```
    /// use spellcast_solver::dictionary::Dictionary;
    ///
    /// let dictionary = Dictionary::new(["cat", "Cart"]);
    /// assert!(dictionary.has_word("cart"));
    /// assert!(dictionary.has_prefix("car"));
    /// assert!(!dictionary.has_word("car"));
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_set = FxHashSet::default();
        let mut prefixes = FxHashSet::default();

        for word in words {
            let word = word.as_ref().trim().to_ascii_lowercase();
            if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
                continue;
            }

            // ASCII only, so every byte index is a char boundary
            for end in 1..=word.len() {
                prefixes.insert(word[..end].to_string());
            }
            word_set.insert(word);
        }

        Self {
            words: word_set,
            prefixes,
            word_cache: QueryCache::default(),
            prefix_cache: QueryCache::default(),
        }
    }

    /// Dictionary built from the word list compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(WORDS)
    }

    /// Is `s` a complete word?
    #[must_use]
    pub fn has_word(&self, s: &str) -> bool {
        memoized(&self.word_cache, s, || self.words.contains(s))
    }

    /// Is `s` a prefix of at least one word (a word counts as its own prefix)?
    #[must_use]
    pub fn has_prefix(&self, s: &str) -> bool {
        memoized(&self.prefix_cache, s, || self.prefixes.contains(s))
    }

    /// Letters available for substitution
    #[inline]
    #[must_use]
    pub const fn alphabet(&self) -> &'static [u8; 26] {
        &ALPHABET
    }

    /// Number of words
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct queries answered from the memo caches so far
    #[must_use]
    pub fn cached_queries(&self) -> usize {
        self.word_cache.len() + self.prefix_cache.len()
    }

    /// Drop memoized query results
    pub fn clear_cache(&self) {
        self.word_cache.clear();
        self.prefix_cache.clear();
    }
}

/// Look `key` up in `cache`, computing and storing the answer on a miss
///
/// Concurrent misses on one key compute and store the same answer.
fn memoized(cache: &QueryCache, key: &str, lookup: impl FnOnce() -> bool) -> bool {
    if let Some(hit) = cache.get(key).map(|entry| *entry) {
        return hit;
    }

    let found = lookup();
    cache.insert(key.to_owned(), found);
    found
}
