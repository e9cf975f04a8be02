//! Move search
//!
//! Path enumeration over the board, scoring, the gem economy model and the
//! shuffle evaluator.

pub mod economy;
mod engine;
mod moves;
mod node;
pub mod search;
mod shuffle;

pub use engine::{Ranking, Solver, deduplicate, rank};
pub use moves::Move;
pub use node::{LONG_WORD_BONUS, LONG_WORD_LENGTH, SearchNode};
pub use search::{LeafFilter, SearchLimits};
pub use shuffle::{ShuffleAdvice, evaluate_shuffle};
