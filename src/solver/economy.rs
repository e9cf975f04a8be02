//! Gem economy model
//!
//! Empirical tables converting a gem balance into expected future points.
//! Gem balances are bucketed into tiers of width 3 (0-2, 3-5, 6-8, 9+); each
//! tier unlocks one more letter swap per move.

use std::sync::LazyLock;

/// Gems spent per letter swap, and the width of a gem tier
pub const SWAP_COST: u32 = 3;

/// Gem balance cap used by the lookup tables
pub const MAX_GEMS: u32 = 10;

/// Average score achieved in a round, by gem tier
pub const AVERAGE_SCORES: [f64; 4] = [32.7, 57.5, 74.0, 86.0];

/// Average net gems gained (collected minus spent) in a round, by gem tier
pub const AVERAGE_NET_GEM_PROFITS: [f64; 4] = [2.8, 1.0, -0.8, -2.6];

/// Expected value of holding `n` gems, for `n` in `0..=MAX_GEMS`
static GEM_VALUES: LazyLock<[f64; MAX_GEMS as usize + 1]> =
    LazyLock::new(|| std::array::from_fn(|gems| interpolated_gem_value(gems as f64)));

/// Tier index for a (possibly fractional) gem balance
///
/// Negative balances map to tier 0, balances of 9 or more to tier 3.
#[inline]
#[must_use]
pub fn gem_tier(gems: f64) -> usize {
    let tier = (gems / f64::from(SWAP_COST)).floor();
    if tier <= 0.0 {
        0
    } else {
        (tier as usize).min(AVERAGE_SCORES.len() - 1)
    }
}

/// Average round score for the tier `gems` falls in
#[inline]
#[must_use]
pub fn average_score(gems: f64) -> f64 {
    AVERAGE_SCORES[gem_tier(gems)]
}

/// Average net gem profit for the tier `gems` falls in
#[inline]
#[must_use]
pub fn average_net_gem_profit(gems: f64) -> f64 {
    AVERAGE_NET_GEM_PROFITS[gem_tier(gems)]
}

/// Expected value of a gem balance, interpolated linearly inside each tier
///
/// Each full tier is worth the score gain it unlocks over the tier below;
/// a partially filled tier is worth the matching fraction of that gain.
/// The result is rounded to one decimal place.
#[must_use]
pub fn interpolated_gem_value(gems: f64) -> f64 {
    let mut value = 0.0;

    for swaps in 1..AVERAGE_SCORES.len() {
        let threshold = f64::from(SWAP_COST) * swaps as f64;
        let tier_gain = AVERAGE_SCORES[swaps] - AVERAGE_SCORES[swaps - 1];

        if gems >= threshold {
            value += tier_gain;
        } else if gems > threshold - f64::from(SWAP_COST) {
            let progress = gems - (threshold - f64::from(SWAP_COST));
            value += tier_gain / f64::from(SWAP_COST) * progress;
        }
    }

    (value * 10.0).round() / 10.0
}

/// Expected value of holding `gems` gems, clamped at `MAX_GEMS`
///
/// # Examples
/// ```
/// use spellcast_solver::solver::economy::gem_value;
///
/// assert_eq!(gem_value(0), 0.0);
/// assert_eq!(gem_value(12), gem_value(10));
/// ```
#[inline]
#[must_use]
pub fn gem_value(gems: u32) -> f64 {
    GEM_VALUES[gems.min(MAX_GEMS) as usize]
}
