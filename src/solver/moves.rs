//! Display form of a candidate move

use std::collections::BTreeMap;

/// A ranked move as handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    /// Word formed (lowercase)
    pub word: String,
    /// Points scored this turn
    pub score: u32,
    /// Gem tiles collected
    pub gem_count: u32,
    /// Letters substituted
    pub swap_count: u32,
    /// Score plus expected value of the resulting gem balance
    pub long_term_score: f64,
    /// Path as 1-indexed `(column, row)` pairs
    pub coordinates: Vec<(usize, usize)>,
    /// Substituted letter (uppercase) by 1-indexed coordinate; empty without swaps
    pub swaps: BTreeMap<(usize, usize), char>,
}

impl Move {
    /// Does the move use any swaps?
    #[must_use]
    pub fn has_swaps(&self) -> bool {
        !self.swaps.is_empty()
    }
}
