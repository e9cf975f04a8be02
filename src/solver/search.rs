//! Per-start-tile backtracking search
//!
//! Walks the adjacency graph depth-first from one tile, extending the path only
//! while the spelled string is still a dictionary prefix. Every path that spells
//! a complete word is recorded; exploration continues past it since a word can
//! also prefix a longer one.

use super::economy::SWAP_COST;
use super::node::{LONG_WORD_BONUS, LONG_WORD_LENGTH, SearchNode};
use crate::core::{BOARD_SIZE, Board, Tile, letter_value};
use crate::dictionary::Dictionary;
use log::trace;
use std::sync::Arc;

/// Longest word the search will build
pub const MAX_WORD_LENGTH: usize = 15;

/// Lossy leaf filter for faster searches
///
/// A word is only recorded when it is long enough and its heuristic score
/// (raw letter values plus the long-word bonus, ignoring multipliers) reaches
/// `min_score`. This can discard valid low-scoring words; searches are
/// exhaustive unless a filter is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafFilter {
    pub min_length: usize,
    pub min_score: u32,
}

impl LeafFilter {
    #[must_use]
    pub const fn new(min_length: usize, min_score: u32) -> Self {
        Self {
            min_length,
            min_score,
        }
    }

    /// Would a word be recorded under this filter?
    #[must_use]
    pub fn accepts(&self, word: &str) -> bool {
        word.len() >= self.min_length && heuristic_score(word) >= self.min_score
    }
}

impl Default for LeafFilter {
    fn default() -> Self {
        Self::new(5, 15)
    }
}

/// Multiplier-free score estimate used by `LeafFilter`
#[must_use]
pub fn heuristic_score(word: &str) -> u32 {
    let letters: u32 = word.bytes().map(letter_value).sum();
    if word.len() >= LONG_WORD_LENGTH {
        letters + LONG_WORD_BONUS
    } else {
        letters
    }
}

/// Bounds applied to every search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum word length
    pub max_depth: usize,
    /// Optional lossy filter on recorded words
    pub leaf_filter: Option<LeafFilter>,
}

impl SearchLimits {
    /// Exhaustive search up to `MAX_WORD_LENGTH` letters
    #[must_use]
    pub const fn exhaustive() -> Self {
        Self {
            max_depth: MAX_WORD_LENGTH,
            leaf_filter: None,
        }
    }

    /// Search with the default lossy leaf filter
    #[must_use]
    pub fn fast() -> Self {
        Self {
            leaf_filter: Some(LeafFilter::default()),
            ..Self::exhaustive()
        }
    }

    fn records(&self, word: &str) -> bool {
        self.leaf_filter.is_none_or(|filter| filter.accepts(word))
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::exhaustive()
    }
}

/// One pending branch: the path so far, its word and the tiles it has used
struct Frame {
    node: Arc<SearchNode>,
    word: String,
    visited: u32,
}

#[inline]
const fn tile_bit(tile: &Tile) -> u32 {
    1 << (tile.y() * BOARD_SIZE + tile.x())
}

/// Every dictionary word reachable by a path starting on `start`
///
/// Returns terminal nodes in discovery order. Frozen start tiles yield
/// nothing. Letter swaps are tried when the board's gem balance covers one
/// more swap than the path has already used.
pub fn search_from_tile(
    board: &Board,
    dictionary: &Dictionary,
    limits: &SearchLimits,
    start: &Tile,
) -> Vec<Arc<SearchNode>> {
    let mut found = Vec::new();
    if start.is_frozen() {
        return found;
    }

    let gems = board.state().gems();
    let mut stack = vec![Frame {
        node: SearchNode::root(start),
        word: char::from(start.letter()).to_string(),
        visited: tile_bit(start),
    }];

    while let Some(Frame {
        node,
        word,
        visited,
    }) = stack.pop()
    {
        if word.len() > limits.max_depth {
            continue;
        }

        if dictionary.has_word(&word) && limits.records(&word) {
            node.seed_word(&word);
            found.push(Arc::clone(&node));
        }

        if word.len() == limits.max_depth {
            continue;
        }

        let can_swap = gems >= SWAP_COST * (node.swap_count() + 1);

        for tile in board.neighbors(node.x(), node.y()) {
            let bit = tile_bit(tile);
            if tile.is_frozen() || visited & bit != 0 {
                continue;
            }
            let visited = visited | bit;

            let mut next = word.clone();
            next.push(char::from(tile.letter()));
            if dictionary.has_prefix(&next) {
                stack.push(Frame {
                    node: node.extend(tile),
                    word: next,
                    visited,
                });
            }

            if !can_swap {
                continue;
            }

            for &letter in dictionary.alphabet() {
                if letter == tile.letter() {
                    continue;
                }

                let mut swapped = word.clone();
                swapped.push(char::from(letter));
                if dictionary.has_prefix(&swapped) {
                    stack.push(Frame {
                        node: node.extend_swapped(tile, letter),
                        word: swapped,
                        visited,
                    });
                }
            }
        }
    }

    trace!(
        "start ({}, {}): {} words",
        start.x(),
        start.y(),
        found.len()
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn words(nodes: &[Arc<SearchNode>]) -> Vec<&str> {
        let mut words: Vec<&str> = nodes.iter().map(|n| n.word()).collect();
        words.sort_unstable();
        words
    }

    #[test]
    fn finds_adjacent_word() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["at"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert_eq!(words(&found), vec!["at"]);
        assert_eq!(found[0].chain().len(), 2);
    }

    #[test]
    fn continues_past_complete_words() {
        let b = board("ATEXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["at", "ate"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert_eq!(words(&found), vec!["at", "ate"]);
    }

    #[test]
    fn single_letter_words_recorded() {
        let b = board("AXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["a"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert_eq!(words(&found), vec!["a"]);
    }

    #[test]
    fn paths_do_not_reuse_tiles() {
        // "ana" would need the single A twice
        let b = board("ANXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["ana", "an"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert_eq!(words(&found), vec!["an"]);
    }

    #[test]
    fn same_tile_reachable_on_different_paths() {
        // T reached directly and via E
        let b = board("ATXXX\nEXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["at", "aet"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert_eq!(words(&found), vec!["aet", "at"]);
    }

    #[test]
    fn frozen_tiles_block_paths() {
        let b = board("AT#XXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["at"]);

        let from_a = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );
        assert!(from_a.is_empty());

        let frozen_start = Dictionary::new(["t"]);
        let from_t = search_from_tile(
            &b,
            &frozen_start,
            &SearchLimits::default(),
            b.tile_at(1, 0).unwrap(),
        );
        assert!(from_t.is_empty());
    }

    #[test]
    fn no_swaps_without_gems() {
        let b = board("AXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n2\n1");
        let dictionary = Dictionary::new(["at"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        assert!(found.is_empty());
    }

    #[test]
    fn swap_with_three_gems() {
        let b = board("AXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n3\n1");
        let dictionary = Dictionary::new(["at"]);

        let found = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );

        // One "at" per neighbor of (0, 0)
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|n| n.word() == "at" && n.swap_count() == 1));
    }

    #[test]
    fn second_swap_needs_six_gems() {
        let dictionary = Dictionary::new(["ate"]);

        let three = board("AXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n5\n1");
        let found = search_from_tile(
            &three,
            &dictionary,
            &SearchLimits::default(),
            three.tile_at(0, 0).unwrap(),
        );
        assert!(found.is_empty());

        let six = board("AXXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n6\n1");
        let found = search_from_tile(
            &six,
            &dictionary,
            &SearchLimits::default(),
            six.tile_at(0, 0).unwrap(),
        );
        assert!(!found.is_empty());
        assert!(found.iter().all(|n| n.swap_count() == 2));
    }

    #[test]
    fn depth_cap_limits_word_length() {
        let b = board("ABCDE\nJIHGF\nKLMNO\nTSRQP\nUVWXY\n0\n1");
        let dictionary = Dictionary::new(["abcdefghij"]);
        let limits = SearchLimits {
            max_depth: 5,
            leaf_filter: None,
        };

        let capped = search_from_tile(&b, &dictionary, &limits, b.tile_at(0, 0).unwrap());
        assert!(capped.is_empty());

        let full = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::default(),
            b.tile_at(0, 0).unwrap(),
        );
        assert_eq!(words(&full), vec!["abcdefghij"]);
    }

    #[test]
    fn leaf_filter_drops_short_and_cheap_words() {
        let b = board("STRAN\nXXXXD\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let dictionary = Dictionary::new(["st", "strand"]);

        let exhaustive = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::exhaustive(),
            b.tile_at(0, 0).unwrap(),
        );
        assert_eq!(words(&exhaustive), vec!["st", "strand"]);

        let fast = search_from_tile(
            &b,
            &dictionary,
            &SearchLimits::fast(),
            b.tile_at(0, 0).unwrap(),
        );
        assert_eq!(words(&fast), vec!["strand"]);
    }

    #[test]
    fn heuristic_score_ignores_multipliers() {
        assert_eq!(heuristic_score("cat"), 5 + 1 + 2);
        assert_eq!(heuristic_score("strand"), 12 + LONG_WORD_BONUS);
        assert!(LeafFilter::default().accepts("strand"));
        assert!(!LeafFilter::default().accepts("cats"));
    }
}
