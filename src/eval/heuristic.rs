//! Pattern-count heuristic
//!
//! Scores a position from the perspective of one player as
//! `(mine - theirs) / (mine + theirs + 1)`, where each side counts its
//! satisfied four-in-line and three-in-line formulas over the empty fields,
//! weighted by [`FOUR_WEIGHT`] and [`THREE_WEIGHT`]. The value lies strictly
//! inside (-1, 1), so it never ties with a decided game.

use crate::board::{GameState, Player};
use crate::config::tuning::{FOUR_WEIGHT, THREE_WEIGHT};
use crate::error::Result;
use crate::rules::{PatternKind, RuleStore};

/// Weighted pattern counts `(first, second)` over the empty fields
pub fn pattern_balance(store: &RuleStore, state: &GameState) -> Result<(f64, f64)> {
    store.check_state(state)?;
    Ok(weighted_counts(store, state))
}

/// Evaluate the position from the perspective of `player`.
///
/// Returns a score where:
/// - Positive values indicate advantage for `player`
/// - Negative values indicate disadvantage for `player`
/// - 0 means balanced (or no patterns at all)
///
/// # Arguments
/// * `store` - Rule store providing the pattern formulas
/// * `state` - The current game state, sized for the store
/// * `player` - The player to evaluate for
pub fn evaluate(store: &RuleStore, state: &GameState, player: Player) -> Result<f64> {
    store.check_state(state)?;
    Ok(score(store, state, player))
}

/// Unchecked [`evaluate`] for states already validated against the store
pub(crate) fn score(store: &RuleStore, state: &GameState, player: Player) -> f64 {
    let (first, second) = weighted_counts(store, state);
    let (mine, theirs) = match player {
        Player::First => (first, second),
        Player::Second => (second, first),
    };
    (mine - theirs) / (mine + theirs + 1.0)
}

fn weighted_counts(store: &RuleStore, state: &GameState) -> (f64, f64) {
    let mut first = 0.0;
    let mut second = 0.0;
    for field in state.empty_fields() {
        for rules in store.pattern_rules(field) {
            let weight = match rules.kind {
                PatternKind::Four => FOUR_WEIGHT,
                PatternKind::Three => THREE_WEIGHT,
                PatternKind::Nearby | PatternKind::Other => continue,
            };
            for owner in rules.satisfied_owners(state) {
                match owner {
                    Some(Player::First) => first += weight,
                    Some(Player::Second) => second += weight,
                    None => {}
                }
            }
        }
    }
    (first, second)
}
