//! Board shuffle evaluation
//!
//! Shuffling costs one gem and the current turn. It pays off when the
//! simulated value of the coming rounds beats the best available move plus
//! the value of the gem spent.

use super::economy::{self, gem_value};
use super::node::SearchNode;
use crate::core::{Board, FINAL_ROUND};

/// Rounds simulated ahead of a shuffle
const LOOKAHEAD_ROUNDS: u8 = 2;

/// Outcome of a shuffle evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuffleAdvice {
    /// Simulated points from shuffling now
    pub expected_score: f64,
    /// Whether shuffling beats playing the best move
    pub should_shuffle: bool,
}

impl ShuffleAdvice {
    /// Advice for a board where shuffling is impossible
    pub const NEVER: Self = Self {
        expected_score: 0.0,
        should_shuffle: false,
    };
}

/// Decide whether shuffling beats the best available move
///
/// Without gems a shuffle cannot be paid for. Otherwise the remaining gems are
/// rolled forward through up to two rounds using the average score and gem
/// profit of each tier, and the result is compared against `top_move`'s long
/// term score plus the value of the gem a shuffle would cost. Without a top
/// move the comparison baseline is zero.
#[must_use]
pub fn evaluate_shuffle(board: &Board, top_move: Option<&SearchNode>) -> ShuffleAdvice {
    let state = board.state();
    if state.gems() == 0 {
        return ShuffleAdvice::NEVER;
    }

    let remaining_rounds = (FINAL_ROUND + 1).saturating_sub(state.round());
    let mut sim_gems = f64::from(state.gems() - 1);
    let mut sim_score = 0.0;
    let mut next_round_gems = sim_gems;

    for round in 0..LOOKAHEAD_ROUNDS.min(remaining_rounds) {
        sim_score += economy::average_score(sim_gems);
        sim_gems += economy::average_net_gem_profit(sim_gems);
        if round == 0 {
            next_round_gems = sim_gems;
        }
    }

    if state.round() < 4 {
        sim_score += economy::interpolated_gem_value(next_round_gems);
    }
    if state.round() == FINAL_ROUND {
        sim_score += sim_gems;
    }

    let baseline = top_move.map_or(0.0, |node| node.estimated_long_term_score(state));
    let shuffle_cost = gem_value(state.gems()) - gem_value(state.gems() - 1);

    ShuffleAdvice {
        expected_score: sim_score,
        should_shuffle: sim_score > baseline + shuffle_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(gems: u32, round: u8) -> Board {
        format!("ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n{gems}\n{round}")
            .parse()
            .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_gems_never_shuffles() {
        assert_eq!(evaluate_shuffle(&board(0, 1), None), ShuffleAdvice::NEVER);
        assert_eq!(evaluate_shuffle(&board(0, 5), None), ShuffleAdvice::NEVER);
    }

    #[test]
    fn early_round_simulates_two_rounds_and_gem_value() {
        // 4 gems: shuffle leaves 3 (tier 1), then 3 + 1.0 = 4 (tier 1)
        let advice = evaluate_shuffle(&board(4, 1), None);
        let expected = 57.5 + 57.5 + economy::interpolated_gem_value(4.0);

        assert!(close(advice.expected_score, expected));
        assert!(advice.should_shuffle);
    }

    #[test]
    fn high_balance_uses_upper_tiers() {
        // 8 gems: shuffle leaves 7 (tier 2), then 7 - 0.8 = 6.2 (tier 2)
        let advice = evaluate_shuffle(&board(8, 2), None);
        let expected = 74.0 + 74.0 + economy::interpolated_gem_value(7.0 - 0.8);

        assert!(close(advice.expected_score, expected));
        assert!(advice.should_shuffle);
    }

    #[test]
    fn round_four_skips_gem_value() {
        // 1 gem: shuffle leaves 0, then 0 + 2.8 = 2.8 (still tier 0)
        let advice = evaluate_shuffle(&board(1, 4), None);
        assert!(close(advice.expected_score, 32.7 + 32.7));
    }

    #[test]
    fn final_round_simulates_one_round_and_counts_gems() {
        // 2 gems: shuffle leaves 1, one round adds 2.8
        let advice = evaluate_shuffle(&board(2, 5), None);
        assert!(close(advice.expected_score, 32.7 + 3.8));
    }

    #[test]
    fn strong_top_move_beats_shuffle() {
        let board: Board = "Z$QJXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n1\n5".parse().unwrap();
        let root = SearchNode::root(board.tile_at(0, 0).unwrap());
        let top = root
            .extend(board.tile_at(1, 0).unwrap())
            .extend(board.tile_at(2, 0).unwrap());

        // Final round long-term score is the move score: (8 + 8 + 7) * 2
        let advice = evaluate_shuffle(&board, Some(&*top));
        assert!(close(advice.expected_score, 32.7 + 2.8));
        assert!(!advice.should_shuffle);
    }

    #[test]
    fn weak_top_move_loses_to_shuffle() {
        let board: Board = "ATXXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n1\n5".parse().unwrap();
        let top = SearchNode::root(board.tile_at(0, 0).unwrap())
            .extend(board.tile_at(1, 0).unwrap());

        // 32.7 + 2.8 against 3 points plus the value of one gem
        let advice = evaluate_shuffle(&board, Some(&*top));
        assert!(advice.should_shuffle);
    }
}
