//! Benchmark command
//!
//! Times the solver over a batch of seeded random boards.

use crate::core::{BOARD_SIZE, Board, BoardError, MatchState, Modifier, Modifiers, TILE_COUNT, Tile};
use crate::dictionary::{ALPHABET, Dictionary};
use crate::solver::{Ranking, SearchLimits, Solver};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Relative letter frequencies used to fill random boards, `a` to `z`
const LETTER_WEIGHTS: [u32; 26] = [
    82, 15, 28, 43, 127, 22, 20, 61, 70, 2, 8, 40, 24, 67, 75, 19, 1, 60, 63, 91, 28, 10, 24, 2,
    20, 1,
];

/// Gem tiles placed on each random board
const GEMS_PER_BOARD: usize = 10;

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub boards: usize,
    pub total_words: usize,
    pub average_words: f64,
    pub average_best_score: f64,
    /// Highest scoring move seen and its score
    pub best_move: Option<(String, u32)>,
    pub duration: Duration,
    pub boards_per_second: f64,
}

/// Build a random board from `rng`
///
/// Letters follow English frequencies. Each board gets one letter multiplier,
/// one double-word tile and ten gems; the gem balance and round are random.
///
/// # Errors
///
/// Returns an error if the generated tiles do not form a valid board.
pub fn random_board<R: Rng>(rng: &mut R) -> Result<Board, BoardError> {
    let total_weight: u32 = LETTER_WEIGHTS.iter().sum();
    let mut modifiers = [Modifiers::NONE; TILE_COUNT];

    let multiplier = if rng.random_bool(0.5) {
        Modifier::DoubleLetter
    } else {
        Modifier::TripleLetter
    };
    modifiers[rng.random_range(0..TILE_COUNT)].insert(multiplier);
    modifiers[rng.random_range(0..TILE_COUNT)].insert(Modifier::DoubleWord);
    for i in index::sample(rng, TILE_COUNT, GEMS_PER_BOARD) {
        modifiers[i].insert(Modifier::Gem);
    }

    let tiles: Vec<Tile> = modifiers
        .iter()
        .enumerate()
        .map(|(i, &mods)| {
            let mut roll = rng.random_range(0..total_weight);
            let mut letter = ALPHABET[ALPHABET.len() - 1];
            for (&candidate, &weight) in ALPHABET.iter().zip(&LETTER_WEIGHTS) {
                if roll < weight {
                    letter = candidate;
                    break;
                }
                roll -= weight;
            }
            Tile::new(letter, i % BOARD_SIZE, i / BOARD_SIZE, mods)
        })
        .collect();

    let state = MatchState::new(rng.random_range(0..=10), rng.random_range(1..=5))?;
    Board::new(&tiles, state)
}

/// Solve `count` random boards generated from `seed`
///
/// # Errors
///
/// Returns an error if a generated board is invalid.
pub fn run_benchmark(
    dictionary: &Dictionary,
    limits: SearchLimits,
    count: usize,
    seed: u64,
    show_progress: bool,
) -> Result<BenchmarkResult, BoardError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let solver = Solver::with_limits(dictionary, limits);

    let pb = if show_progress {
        ProgressBar::new(count as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let mut total_words = 0;
    let mut total_best_score = 0u64;
    let mut best_move: Option<(String, u32)> = None;

    for _ in 0..count {
        let board = random_board(&mut rng)?;
        let state = board.state();
        let moves = solver.legal_moves(&board, Some(Ranking::Score));
        total_words += moves.len();

        if let Some(top) = moves.first() {
            let score = top.score(Some(state));
            total_best_score += u64::from(score);
            if best_move.as_ref().is_none_or(|(_, best)| score > *best) {
                pb.set_message(format!("best: {} ({score})", top.word()));
                best_move = Some((top.word().to_string(), score));
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    let duration = start.elapsed();
    debug!("benchmark of {count} boards took {duration:.2?}");

    let per_board = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    Ok(BenchmarkResult {
        boards: count,
        total_words,
        average_words: per_board(total_words as f64),
        average_best_score: per_board(total_best_score as f64),
        best_move,
        duration,
        boards_per_second: count as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
