//! Main move search interface

use super::moves::Move;
use super::node::SearchNode;
use super::search::{SearchLimits, search_from_tile};
use crate::core::{Board, BoardError, MatchState, Tile};
use crate::dictionary::Dictionary;
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

/// Order in which moves are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ranking {
    /// Immediate points, highest first
    #[default]
    Score,
    /// Points plus expected value of the remaining gems, highest first; ties
    /// go to the move collecting more gems
    LongTerm,
}

impl Ranking {
    /// `LongTerm` when gem management is enabled, `Score` otherwise
    #[must_use]
    pub const fn from_gem_management(enabled: bool) -> Self {
        if enabled { Self::LongTerm } else { Self::Score }
    }

    /// Compare two moves; `Less` means `a` ranks first
    #[must_use]
    pub fn compare(self, a: &SearchNode, b: &SearchNode, state: MatchState) -> Ordering {
        match self {
            Self::Score => b.score(Some(state)).cmp(&a.score(Some(state))),
            Self::LongTerm => b
                .estimated_long_term_score(state)
                .total_cmp(&a.estimated_long_term_score(state))
                .then_with(|| b.gem_count().cmp(&a.gem_count())),
        }
    }
}

/// Main move finder
///
/// Holds the dictionary by reference so one instance (and its query caches)
/// serves every search.
pub struct Solver<'a> {
    dictionary: &'a Dictionary,
    limits: SearchLimits,
}

impl<'a> Solver<'a> {
    /// Create an exhaustive solver
    #[must_use]
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self::with_limits(dictionary, SearchLimits::default())
    }

    /// Create a solver with custom search limits
    #[must_use]
    pub const fn with_limits(dictionary: &'a Dictionary, limits: SearchLimits) -> Self {
        Self { dictionary, limits }
    }

    /// All words reachable from the tile at `(x, y)`
    ///
    /// Returns terminal nodes in discovery order, without deduplication.
    ///
    /// # Errors
    /// Returns `BoardError::OutOfRange` if `(x, y)` is not on the board.
    pub fn legal_moves_from(
        &self,
        board: &Board,
        x: usize,
        y: usize,
    ) -> Result<Vec<Arc<SearchNode>>, BoardError> {
        let start = board.tile_at(x, y)?;
        Ok(search_from_tile(board, self.dictionary, &self.limits, start))
    }

    /// Every distinct word playable on the board
    ///
    /// Runs one search per unfrozen start tile in parallel, merges the results
    /// in board order and keeps the best path for each word. With a ranking
    /// the result is sorted (stably) best first; otherwise it stays in merge
    /// order. An empty result means no legal move exists.
    ///
    /// The dictionary's query caches are cleared once the search is done, so
    /// they never hold more than one board's worth of queries.
    pub fn legal_moves(&self, board: &Board, ranking: Option<Ranking>) -> Vec<Arc<SearchNode>> {
        let start = Instant::now();
        let state = board.state();

        let roots: Vec<&Tile> = board.tiles().filter(|tile| !tile.is_frozen()).collect();
        let per_root: Vec<Vec<Arc<SearchNode>>> = roots
            .par_iter()
            .map(|&tile| search_from_tile(board, self.dictionary, &self.limits, tile))
            .collect();

        let raw_count: usize = per_root.iter().map(Vec::len).sum();
        let mut moves = deduplicate(per_root.into_iter().flatten(), state);

        if let Some(ranking) = ranking {
            rank(&mut moves, ranking, state);
        }

        debug!(
            "searched {} start tiles: {} paths, {} distinct words in {:.2?}",
            roots.len(),
            raw_count,
            moves.len(),
            start.elapsed()
        );
        self.dictionary.clear_cache();

        moves
    }

    /// The top `count` moves in display form
    ///
    /// # Examples
    /// ```
    /// use spellcast_solver::core::Board;
    /// use spellcast_solver::dictionary::Dictionary;
    /// use spellcast_solver::solver::{Ranking, Solver};
    ///
    /// let dictionary = Dictionary::new(["at", "tab"]);
    /// let board: Board = "TABXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1".parse().unwrap();
    ///
    /// let moves = Solver::new(&dictionary).best_moves(&board, Ranking::Score, 5);
    /// assert_eq!(moves[0].word, "tab");
    /// assert_eq!(moves[1].word, "at");
    /// ```
    #[must_use]
    pub fn best_moves(&self, board: &Board, ranking: Ranking, count: usize) -> Vec<Move> {
        let state = board.state();
        self.legal_moves(board, Some(ranking))
            .iter()
            .take(count)
            .map(|node| node.to_move(state))
            .collect()
    }
}

/// Keep one path per word, preserving first-seen order
///
/// A later path replaces the kept one if it scores higher, or scores the same
/// with fewer swaps, or also ties on swaps and collects more gems.
pub fn deduplicate<I>(candidates: I, state: MatchState) -> Vec<Arc<SearchNode>>
where
    I: IntoIterator<Item = Arc<SearchNode>>,
{
    let mut kept: Vec<Arc<SearchNode>> = Vec::new();
    let mut index_by_word: FxHashMap<String, usize> = FxHashMap::default();

    for candidate in candidates {
        match index_by_word.get(candidate.word()) {
            Some(&index) => {
                if is_better(&candidate, &kept[index], state) {
                    kept[index] = candidate;
                }
            }
            None => {
                index_by_word.insert(candidate.word().to_string(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

/// Tie-break order for two paths spelling the same word
fn is_better(candidate: &SearchNode, existing: &SearchNode, state: MatchState) -> bool {
    let by_score = candidate
        .score(Some(state))
        .cmp(&existing.score(Some(state)));
    let by_swaps = existing.swap_count().cmp(&candidate.swap_count());
    let by_gems = candidate.gem_count().cmp(&existing.gem_count());

    by_score.then(by_swaps).then(by_gems) == Ordering::Greater
}

/// Stable sort, best move first
pub fn rank(moves: &mut [Arc<SearchNode>], ranking: Ranking, state: MatchState) {
    moves.sort_by(|a, b| ranking.compare(a, b, state));
}
