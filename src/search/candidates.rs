//! Candidate move generation
//!
//! Internal search nodes only expand a bounded set of empty fields. Three
//! policies are available:
//! - all: every empty field (exhaustive, for small boards and tests)
//! - nearby: empty fields close to an existing stone
//! - formula-guided: tactical shortlist from the rule store, capped at K

use crate::board::{center_field, coord_to_index, in_bounds, index_to_coord, GameState};
use crate::config::{CandidatePolicy, EngineConfig};
use crate::rules::RuleStore;

/// Every empty field, ascending
pub fn all_empty(state: &GameState) -> Vec<usize> {
    state.empty_fields().collect()
}

/// Empty fields within Chebyshev distance `radius` of any stone, ascending.
///
/// On an empty board this is the centre field alone.
pub fn nearby(state: &GameState, radius: u8) -> Vec<usize> {
    let size = state.size();
    if state.is_empty() {
        return vec![center_field(size)];
    }
    let r = i32::from(radius);
    let mut marked = vec![false; state.field_count() + 1];
    for field in state.occupied_fields() {
        let (x, y) = index_to_coord(field, size);
        let (x, y) = (x as i32, y as i32);
        for ny in y - r..=y + r {
            for nx in x - r..=x + r {
                if in_bounds(nx, ny, size) {
                    marked[coord_to_index(nx as usize, ny as usize, size)] = true;
                }
            }
        }
    }
    state.empty_fields().filter(|&f| marked[f]).collect()
}

/// Rule-driven shortlist of at most `count` fields.
///
/// Fields flagged by four/three-in-line patterns come first, strongest
/// first. Remaining slots are filled with nearby-flagged fields, then with
/// any field, both in main-rule ranking order.
pub fn formula_guided(store: &RuleStore, state: &GameState, count: usize) -> Vec<usize> {
    let flagged: Vec<_> = store.flagged(state).collect();

    let mut tactical: Vec<_> = flagged
        .iter()
        .filter(|(_, s)| s.four + s.three > 0)
        .collect();
    // stable: equal scores keep field order
    tactical.sort_by(|(_, a), (_, b)| (b.four, b.three).cmp(&(a.four, a.three)));
    let mut picked: Vec<usize> = tactical.iter().take(count).map(|(f, _)| *f).collect();
    if picked.len() >= count {
        return picked;
    }

    let ranking = store.rank_fields(state);
    let is_nearby = |field: usize| {
        flagged
            .iter()
            .any(|(f, s)| *f == field && s.nearby > 0)
    };
    for &(_, field) in &ranking {
        if picked.len() >= count {
            break;
        }
        if is_nearby(field) && !picked.contains(&field) {
            picked.push(field);
        }
    }
    for &(_, field) in &ranking {
        if picked.len() >= count {
            break;
        }
        if !picked.contains(&field) {
            picked.push(field);
        }
    }
    picked
}

/// Candidate generator bound to a store and configuration
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    store: &'a RuleStore,
    policy: CandidatePolicy,
    count: usize,
    radius: u8,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(store: &'a RuleStore, config: &EngineConfig) -> Self {
        Self {
            store,
            policy: config.candidate_policy,
            count: config.candidate_count,
            radius: config.nearby_radius,
        }
    }

    #[inline]
    pub fn policy(&self) -> CandidatePolicy {
        self.policy
    }

    /// Candidate fields for the side to move
    pub fn generate(&self, state: &GameState) -> Vec<usize> {
        match self.policy {
            CandidatePolicy::All => all_empty(state),
            CandidatePolicy::Nearby => nearby(state, self.radius),
            CandidatePolicy::FormulaGuided => formula_guided(self.store, state, self.count),
        }
    }
}
