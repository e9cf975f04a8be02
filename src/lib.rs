//! Spellcast Solver
//!
//! Move finder for 5x5 letter-grid word games. Words are traced through
//! adjacent tiles, letter swaps are paid for with gems, and moves can be
//! ranked by immediate points or by long-term value under a gem economy model.
//!
//! # Quick Start
//!
//! ```rust
//! use spellcast_solver::core::Board;
//! use spellcast_solver::dictionary::Dictionary;
//! use spellcast_solver::solver::{Ranking, Solver, evaluate_shuffle};
//!
//! let dictionary = Dictionary::new(["cat", "at"]);
//! let board: Board = "CA$TXX\nXXXXX\nXXXXX\nXXXXX\nXXXXX\n0\n1".parse().unwrap();
//!
//! let solver = Solver::new(&dictionary);
//! let moves = solver.best_moves(&board, Ranking::Score, 3);
//! assert_eq!(moves[0].word, "cat");
//! assert_eq!(moves[0].score, 16);
//!
//! let advice = evaluate_shuffle(&board, None);
//! assert!(!advice.should_shuffle);
//! ```

// Core domain types
pub mod core;

// Word lists and prefix queries
pub mod dictionary;

// Move search and scoring
pub mod solver;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
