//! Command implementations

pub mod benchmark;
pub mod solve;

pub use benchmark::{BenchmarkResult, random_board, run_benchmark};
pub use solve::{SolveConfig, SolveResult, solve_board, solve_text};
