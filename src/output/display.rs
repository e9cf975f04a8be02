//! Display functions for command results

use super::formatters::{create_progress_bar, format_move_line, format_path, format_swaps};
use crate::commands::{BenchmarkResult, SolveResult};
use crate::solver::Ranking;
use colored::Colorize;

/// Print the result of solving a board
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!("{}", "Board:".bright_cyan().bold());
    for line in result.board.to_string().lines() {
        println!("  {line}");
    }
    println!("{}", "─".repeat(60).cyan());

    if result.moves.is_empty() {
        println!("\n{}", "No playable words on this board".red().bold());
    }

    let top_score = result.best().map_or(1, |mv| mv.score.max(1));
    for (i, mv) in result.moves.iter().enumerate() {
        println!(
            "\n{}",
            format_move_line(i + 1, mv).bright_yellow().bold()
        );

        if let Some(swaps) = format_swaps(mv) {
            println!("  Swaps: {}", swaps.magenta());
        }
        println!("  Path:  {}", format_path(&mv.coordinates));

        if result.ranking == Ranking::LongTerm {
            println!("  Long-term value: {:.1}", mv.long_term_score);
        }
        if verbose {
            let bar = create_progress_bar(f64::from(mv.score), f64::from(top_score), 20);
            println!("  [{}] {} swaps", bar.green(), mv.swap_count);
        }
    }

    println!();
    let shuffle = &result.shuffle;
    if shuffle.should_shuffle {
        println!(
            "{}",
            format!(
                "Shuffle recommended (expected {:.1} points)",
                shuffle.expected_score
            )
            .green()
            .bold()
        );
    } else {
        println!("{}", "Shuffle not recommended".bright_black());
    }

    if verbose {
        println!(
            "\n{} words found in {:.2}ms",
            result.total_words,
            result.duration.as_secs_f64() * 1000.0
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n{}", "Performance:".bright_cyan().bold());
    println!("   Boards solved:    {}", result.boards);
    println!("   Words found:      {}", result.total_words);
    println!("   Words per board:  {:.1}", result.average_words);
    println!(
        "   Avg best score:   {}",
        format!("{:.1}", result.average_best_score)
            .bright_yellow()
            .bold()
    );
    if let Some((word, score)) = &result.best_move {
        println!(
            "   Best move:        {} ({score} points)",
            word.to_uppercase().green()
        );
    }
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Boards/second:    {:.1}", result.boards_per_second);
}
