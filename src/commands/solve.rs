//! Board solving command
//!
//! Finds and ranks the moves for one board and evaluates a shuffle against the
//! best of them.

use crate::core::{Board, BoardError};
use crate::dictionary::Dictionary;
use crate::solver::{Move, Ranking, SearchLimits, ShuffleAdvice, Solver, evaluate_shuffle};
use log::info;
use std::time::{Duration, Instant};

/// Configuration for solving a board
#[derive(Debug, Clone, Copy)]
pub struct SolveConfig {
    /// Number of moves to report
    pub moves_shown: usize,
    pub ranking: Ranking,
    pub limits: SearchLimits,
}

impl SolveConfig {
    #[must_use]
    pub fn new(moves_shown: usize, ranking: Ranking) -> Self {
        Self {
            moves_shown,
            ranking,
            limits: SearchLimits::default(),
        }
    }
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self::new(3, Ranking::Score)
    }
}

/// Result of solving a board
pub struct SolveResult {
    pub board: Board,
    pub ranking: Ranking,
    /// Best moves, best first
    pub moves: Vec<Move>,
    /// Distinct words playable on the board
    pub total_words: usize,
    pub shuffle: ShuffleAdvice,
    pub duration: Duration,
}

impl SolveResult {
    /// Best move, if any word can be played
    #[must_use]
    pub fn best(&self) -> Option<&Move> {
        self.moves.first()
    }
}

/// Solve a parsed board
#[must_use]
pub fn solve_board(board: Board, dictionary: &Dictionary, config: &SolveConfig) -> SolveResult {
    let start = Instant::now();
    let state = board.state();
    let solver = Solver::with_limits(dictionary, config.limits);

    let ranked = solver.legal_moves(&board, Some(config.ranking));
    let shuffle = evaluate_shuffle(&board, ranked.first().map(|node| &**node));
    let moves = ranked
        .iter()
        .take(config.moves_shown)
        .map(|node| node.to_move(state))
        .collect();

    let duration = start.elapsed();
    info!(
        "{} words found, {} shown, solved in {:.2?}",
        ranked.len(),
        config.moves_shown.min(ranked.len()),
        duration
    );

    SolveResult {
        board,
        ranking: config.ranking,
        moves,
        total_words: ranked.len(),
        shuffle,
        duration,
    }
}

/// Parse board text and solve it
///
/// # Errors
///
/// Returns an error if the board text is malformed.
pub fn solve_text(
    text: &str,
    dictionary: &Dictionary,
    config: &SolveConfig,
) -> Result<SolveResult, BoardError> {
    let board: Board = text.parse()?;
    Ok(solve_board(board, dictionary, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FormatError;

    const BOARD: &str = "\
CA$TXX
XXXXX
XXXXX
XXXXX
XXXXS
0
1
";

    #[test]
    fn solve_reports_ranked_moves() {
        let dictionary = Dictionary::new(["cat", "at", "a"]);
        let result = solve_text(BOARD, &dictionary, &SolveConfig::default()).unwrap();

        let words: Vec<&str> = result.moves.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(words, vec!["cat", "at", "a"]);
        assert_eq!(result.total_words, 3);
        assert_eq!(result.best().unwrap().score, 16);
    }

    #[test]
    fn solve_truncates_to_moves_shown() {
        let dictionary = Dictionary::new(["cat", "at", "a"]);
        let config = SolveConfig::new(1, Ranking::Score);
        let result = solve_text(BOARD, &dictionary, &config).unwrap();

        assert_eq!(result.moves.len(), 1);
        assert_eq!(result.total_words, 3);
    }

    #[test]
    fn solve_without_gems_never_shuffles() {
        let dictionary = Dictionary::new(["cat"]);
        let result = solve_text(BOARD, &dictionary, &SolveConfig::default()).unwrap();

        assert_eq!(result.shuffle, ShuffleAdvice::NEVER);
    }

    #[test]
    fn solve_with_no_words() {
        let dictionary = Dictionary::new(["zebra"]);
        let result = solve_text(BOARD, &dictionary, &SolveConfig::default()).unwrap();

        assert!(result.moves.is_empty());
        assert!(result.best().is_none());
    }

    #[test]
    fn solve_rejects_malformed_board() {
        let dictionary = Dictionary::new(["cat"]);
        let err = solve_text("CAT\n0\n1", &dictionary, &SolveConfig::default())
            .err()
            .unwrap();

        assert_eq!(err, BoardError::Format(FormatError::TooFewCells(3)));
    }
}
