//! Formatting utilities for terminal output

use crate::solver::Move;

/// Format a move path as 1-indexed coordinates joined by arrows
#[must_use]
pub fn format_path(coordinates: &[(usize, usize)]) -> String {
    coordinates
        .iter()
        .map(|(x, y)| format!("({x}, {y})"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Format the swaps of a move, or `None` when it has none
#[must_use]
pub fn format_swaps(mv: &Move) -> Option<String> {
    if !mv.has_swaps() {
        return None;
    }

    let swaps = mv
        .swaps
        .iter()
        .map(|((x, y), letter)| format!("{letter} at ({x}, {y})"))
        .collect::<Vec<_>>()
        .join(", ");
    Some(swaps)
}

/// One-line move summary: `N > WORD - S points - G gems`
#[must_use]
pub fn format_move_line(rank: usize, mv: &Move) -> String {
    let gems = if mv.gem_count == 1 { "gem" } else { "gems" };
    format!(
        "{rank} > {} - {} points - {} {gems}",
        mv.word.to_uppercase(),
        mv.score,
        mv.gem_count
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
