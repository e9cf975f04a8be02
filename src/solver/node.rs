//! Search path nodes
//!
//! A `SearchNode` is one step of a candidate path. Nodes link back to their
//! parent, so a path is the chain from a start tile to the current node and
//! branches share their common prefix instead of copying it.

use super::economy::{self, MAX_GEMS, SWAP_COST};
use super::moves::Move;
use crate::core::{FINAL_ROUND, MatchState, Modifier, Modifiers, Tile, letter_value};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Words of at least this many letters earn `LONG_WORD_BONUS`
pub const LONG_WORD_LENGTH: usize = 6;

/// Flat bonus for long words
pub const LONG_WORD_BONUS: u32 = 10;

/// One step of a candidate path
///
/// Immutable after construction. Derived values (word, score, gem count) are
/// computed on first use and cached.
#[derive(Debug)]
pub struct SearchNode {
    parent: Option<Arc<SearchNode>>,
    letter: u8,
    x: usize,
    y: usize,
    modifiers: Modifiers,
    swap: bool,
    len: usize,
    swap_count: u32,
    word: OnceLock<String>,
    base_score: OnceLock<u32>,
    gem_count: OnceLock<u32>,
}

impl SearchNode {
    fn build(parent: Option<Arc<Self>>, tile: &Tile, letter: u8, swap: bool) -> Arc<Self> {
        let (len, parent_swaps) = parent
            .as_deref()
            .map_or((0, 0), |p| (p.len, p.swap_count));

        Arc::new(Self {
            parent,
            letter: letter.to_ascii_lowercase(),
            x: tile.x(),
            y: tile.y(),
            modifiers: tile.modifiers(),
            swap,
            len: len + 1,
            swap_count: parent_swaps + u32::from(swap),
            word: OnceLock::new(),
            base_score: OnceLock::new(),
            gem_count: OnceLock::new(),
        })
    }

    /// Start a path on `tile`
    #[must_use]
    pub fn root(tile: &Tile) -> Arc<Self> {
        Self::build(None, tile, tile.letter(), false)
    }

    /// Extend this path onto `tile` using the tile's own letter
    #[must_use]
    pub fn extend(self: &Arc<Self>, tile: &Tile) -> Arc<Self> {
        Self::build(Some(Arc::clone(self)), tile, tile.letter(), false)
    }

    /// Extend this path onto `tile`, substituting `letter` for the tile's letter
    ///
    /// The node counts as a swap only if `letter` differs from the tile's.
    #[must_use]
    pub fn extend_swapped(self: &Arc<Self>, tile: &Tile, letter: u8) -> Arc<Self> {
        let letter = letter.to_ascii_lowercase();
        let swap = letter != tile.letter();
        Self::build(Some(Arc::clone(self)), tile, letter, swap)
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Letter played at this step (the substituted letter for a swap)
    #[inline]
    #[must_use]
    pub const fn letter(&self) -> u8 {
        self.letter
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.y
    }

    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Did this step substitute a letter?
    #[inline]
    #[must_use]
    pub const fn is_swap(&self) -> bool {
        self.swap
    }

    /// Number of nodes from the root to here
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false: a node is at least its own root
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Nodes from this one back to the root
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |node| node.parent())
    }

    /// Nodes from the root to this one
    #[must_use]
    pub fn chain(&self) -> Vec<&Self> {
        let mut chain: Vec<&Self> = self.ancestors().collect();
        chain.reverse();
        chain
    }

    /// Does the path pass through `(x, y)`?
    #[must_use]
    pub fn chain_contains(&self, x: usize, y: usize) -> bool {
        self.ancestors().any(|node| node.x == x && node.y == y)
    }

    /// Letter value of this step: the played letter with the tile's multiplier
    #[inline]
    #[must_use]
    pub const fn value(&self) -> u32 {
        letter_value(self.letter) * self.modifiers.letter_multiplier()
    }

    /// Word spelled by the path
    pub fn word(&self) -> &str {
        self.word.get_or_init(|| {
            self.chain()
                .iter()
                .map(|node| char::from(node.letter))
                .collect()
        })
    }

    /// Cache the word when the caller already built it during the search
    pub(crate) fn seed_word(&self, word: &str) {
        debug_assert_eq!(word.len(), self.len);
        let stored = self.word.set(word.to_owned()).is_ok();
        debug_assert!(stored || self.word() == word);
    }

    /// Points for playing this path
    ///
    /// Letter values (with letter multipliers) are summed, the sum is doubled
    /// if any tile on the path is a double-word tile, and long words earn a
    /// flat bonus. In the final round collected gems are added as points.
    ///
    /// Only the state-independent part is cached, so scoring the same node
    /// under different match states is safe.
    pub fn score(&self, state: Option<MatchState>) -> u32 {
        let base = *self.base_score.get_or_init(|| self.compute_base_score());
        match state {
            Some(state) if state.is_final_round() => base + self.gem_count(),
            _ => base,
        }
    }

    fn compute_base_score(&self) -> u32 {
        let mut score: u32 = self.ancestors().map(Self::value).sum();

        if self
            .ancestors()
            .any(|node| node.modifiers.contains(Modifier::DoubleWord))
        {
            score *= 2;
        }

        if self.len >= LONG_WORD_LENGTH {
            score += LONG_WORD_BONUS;
        }

        score
    }

    /// Gem tiles on the path
    pub fn gem_count(&self) -> u32 {
        *self.gem_count.get_or_init(|| {
            self.ancestors()
                .filter(|node| node.modifiers.contains(Modifier::Gem))
                .count() as u32
        })
    }

    /// Swapped steps on the path
    #[inline]
    #[must_use]
    pub const fn swap_count(&self) -> u32 {
        self.swap_count
    }

    /// Gems collected minus gems spent on swaps
    #[must_use]
    pub fn net_gem_profit(&self) -> i64 {
        i64::from(self.gem_count()) - i64::from(SWAP_COST * self.swap_count)
    }

    /// Score plus the expected value of the gem balance this move leaves
    ///
    /// Before the final round the projected balance is worth the average
    /// score of its tier next round; before round 4 it additionally carries
    /// its longer-term gem value.
    pub fn estimated_long_term_score(&self, state: MatchState) -> f64 {
        let mut long_term = f64::from(self.score(Some(state)));

        let projected = (i64::from(state.gems()) + self.net_gem_profit())
            .clamp(0, i64::from(MAX_GEMS)) as u32;

        if state.round() < FINAL_ROUND {
            long_term += economy::average_score(f64::from(projected));
        }

        if state.round() < 4 {
            long_term += economy::gem_value(projected);
        }

        long_term
    }

    /// Convert to the display form handed to callers
    ///
    /// Coordinates are 1-indexed `(column, row)`.
    #[must_use]
    pub fn to_move(&self, state: MatchState) -> Move {
        let chain = self.chain();

        let coordinates = chain.iter().map(|node| (node.x + 1, node.y + 1)).collect();
        let swaps: BTreeMap<(usize, usize), char> = chain
            .iter()
            .filter(|node| node.swap)
            .map(|node| {
                (
                    (node.x + 1, node.y + 1),
                    char::from(node.letter.to_ascii_uppercase()),
                )
            })
            .collect();

        Move {
            word: self.word().to_string(),
            score: self.score(Some(state)),
            gem_count: self.gem_count(),
            swap_count: self.swap_count,
            long_term_score: self.estimated_long_term_score(state),
            coordinates,
            swaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn path(board: &Board, coords: &[(usize, usize)]) -> Arc<SearchNode> {
        let (first, rest) = coords.split_first().unwrap();
        let mut node = SearchNode::root(board.tile_at(first.0, first.1).unwrap());
        for &(x, y) in rest {
            node = node.extend(board.tile_at(x, y).unwrap());
        }
        node
    }

    #[test]
    fn word_follows_chain() {
        let b = board("CATSX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let node = path(&b, &[(0, 0), (1, 0), (2, 0), (3, 0)]);

        assert_eq!(node.word(), "cats");
        assert_eq!(node.len(), 4);
        assert_eq!(node.parent().unwrap().word(), "cat");
        assert!(node.chain_contains(2, 0));
        assert!(!node.chain_contains(4, 0));
    }

    #[test]
    fn plain_score_is_letter_sum() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let node = path(&b, &[(0, 0), (1, 0)]);

        assert_eq!(node.score(None), 1 + 2);
        assert_eq!(node.gem_count(), 0);
        assert_eq!(node.swap_count(), 0);
    }

    #[test]
    fn double_word_doubles_total_once() {
        let b = board("CA$TXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let node = path(&b, &[(0, 0), (1, 0), (2, 0)]);

        assert_eq!(node.score(None), (5 + 1 + 2) * 2);
    }

    #[test]
    fn letter_multipliers_apply_per_tile() {
        let b = board("C*A+TXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let node = path(&b, &[(0, 0), (1, 0), (2, 0)]);

        assert_eq!(node.score(None), 5 * 3 + 2 + 2);
    }

    #[test]
    fn long_word_bonus() {
        let b = board("STRAND\nXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        // S T R A N on row 0, D at (0, 1)
        let node = path(&b, &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (0, 1)]);

        assert_eq!(node.word(), "strand");
        assert_eq!(node.score(None), 2 + 2 + 2 + 1 + 2 + 3 + LONG_WORD_BONUS);
    }

    #[test]
    fn final_round_adds_gems_without_poisoning_cache() {
        let b = board("A!T!XXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n5");
        let node = path(&b, &[(0, 0), (1, 0)]);
        let final_round = MatchState::new(0, 5).unwrap();
        let early_round = MatchState::new(0, 1).unwrap();

        assert_eq!(node.gem_count(), 2);
        assert_eq!(node.score(Some(final_round)), 3 + 2);
        assert_eq!(node.score(Some(early_round)), 3);
        assert_eq!(node.score(None), 3);
        assert_eq!(node.score(Some(final_round)), 3 + 2);
    }

    #[test]
    fn score_is_idempotent() {
        let b = board("CA$TXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n3\n2");
        let node = path(&b, &[(0, 0), (1, 0), (2, 0)]);
        let state = b.state();

        assert_eq!(node.score(Some(state)), node.score(Some(state)));
    }

    #[test]
    fn swapped_letter_uses_chosen_value_and_tile_multiplier() {
        let b = board("AT+XXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n3\n1");
        let root = SearchNode::root(b.tile_at(0, 0).unwrap());
        // Z (8) on a double-letter tile
        let node = root.extend_swapped(b.tile_at(1, 0).unwrap(), b'z');

        assert!(node.is_swap());
        assert_eq!(node.word(), "az");
        assert_eq!(node.score(None), 1 + 8 * 2);
        assert_eq!(node.swap_count(), 1);
        assert_eq!(node.net_gem_profit(), -3);
    }

    #[test]
    fn swapping_to_same_letter_is_not_a_swap() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n3\n1");
        let root = SearchNode::root(b.tile_at(0, 0).unwrap());
        let node = root.extend_swapped(b.tile_at(1, 0).unwrap(), b't');

        assert!(!node.is_swap());
        assert_eq!(node.swap_count(), 0);
    }

    #[test]
    fn long_term_score_early_round() {
        let b = board("A!TXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n2\n1");
        let node = path(&b, &[(0, 0), (1, 0)]);

        // 2 gems + 1 collected = 3: tier 1 average plus value of 3 gems
        let expected = 3.0 + 57.5 + 24.8;
        assert!((node.estimated_long_term_score(b.state()) - expected).abs() < 1e-9);
    }

    #[test]
    fn long_term_score_round_four_skips_gem_value() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n6\n4");
        let node = path(&b, &[(0, 0), (1, 0)]);

        let expected = 3.0 + 74.0;
        assert!((node.estimated_long_term_score(b.state()) - expected).abs() < 1e-9);
    }

    #[test]
    fn long_term_score_final_round_is_score() {
        let b = board("A!TXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n6\n5");
        let node = path(&b, &[(0, 0), (1, 0)]);

        assert!((node.estimated_long_term_score(b.state()) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn long_term_projection_clamped() {
        let b = board("A!T!XXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n10\n1");
        let node = path(&b, &[(0, 0), (1, 0)]);

        let expected = 3.0 + 86.0 + economy::gem_value(10);
        assert!((node.estimated_long_term_score(b.state()) - expected).abs() < 1e-9);
    }

    #[test]
    fn to_move_reports_one_indexed_path_and_swaps() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n3\n1");
        let root = SearchNode::root(b.tile_at(0, 0).unwrap());
        let node = root
            .extend(b.tile_at(1, 0).unwrap())
            .extend_swapped(b.tile_at(1, 1).unwrap(), b'e');

        let mv = node.to_move(b.state());
        assert_eq!(mv.word, "ate");
        assert_eq!(mv.coordinates, vec![(1, 1), (2, 1), (2, 2)]);
        assert_eq!(mv.swaps.get(&(2, 2)), Some(&'E'));
        assert_eq!(mv.swaps.len(), 1);
        assert_eq!(mv.swap_count, 1);
    }

    #[test]
    fn seeded_word_matches_chain() {
        let b = board("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1");
        let node = path(&b, &[(0, 0), (1, 0)]);
        node.seed_word("at");
        assert_eq!(node.word(), "at");

        // Seeding again with the same word is allowed once cached
        node.seed_word("at");
        assert_eq!(node.word(), "at");
    }
}
