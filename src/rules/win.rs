//! Win condition checking
//!
//! A player wins with five stones in a row, horizontally, vertically or
//! diagonally. Under [`WinRule::Exact`] the run must be exactly five long;
//! an opponent stone or the board edge may bound it, an own stone may not.

use crate::board::{coord_to_index, in_bounds, index_to_coord, GameState, Player};

pub use crate::config::WinRule;

/// Length of a winning run
pub const WIN_LENGTH: usize = 5;

/// Direction vectors for line checking (4 directions)
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [
    (1, 0),  // Horizontal
    (0, 1),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal NE
];

impl WinRule {
    /// Check whether a run of `len` stones wins
    #[inline]
    pub fn accepts(self, len: usize) -> bool {
        match self {
            WinRule::Exact => len == WIN_LENGTH,
            WinRule::Freestyle => len >= WIN_LENGTH,
        }
    }
}

#[inline]
fn owned(state: &GameState, x: i32, y: i32, player: Player) -> bool {
    let size = state.size();
    in_bounds(x, y, size) && state.is_owned_by(coord_to_index(x as usize, y as usize, size), player)
}

/// Length of the run starting at `(x, y)` going along `(dx, dy)`
#[inline]
fn run_length(state: &GameState, x: i32, y: i32, dx: i32, dy: i32, player: Player) -> usize {
    let mut len = 0;
    let (mut cx, mut cy) = (x, y);
    while owned(state, cx, cy, player) {
        len += 1;
        cx += dx;
        cy += dy;
    }
    len
}

/// First winning run of `player` as (head x, head y, direction)
fn find_run(
    state: &GameState,
    player: Player,
    rule: WinRule,
) -> Option<(i32, i32, (i32, i32))> {
    let size = state.size();
    for field in state.player_fields(player) {
        let (x, y) = index_to_coord(field, size);
        let (x, y) = (x as i32, y as i32);
        for (dx, dy) in DIRECTIONS {
            // Only start at run heads
            if owned(state, x - dx, y - dy, player) {
                continue;
            }
            if rule.accepts(run_length(state, x, y, dx, dy, player)) {
                return Some((x, y, (dx, dy)));
            }
        }
    }
    None
}

/// Check if there's a winning line for the given player
pub fn has_five(state: &GameState, player: Player, rule: WinRule) -> bool {
    find_run(state, player, rule).is_some()
}

/// Find the fields of a winning line.
///
/// Under [`WinRule::Freestyle`] the first five fields of a longer run are
/// reported.
pub fn find_five(state: &GameState, player: Player, rule: WinRule) -> Option<[usize; 5]> {
    let size = state.size();
    find_run(state, player, rule).map(|(x, y, (dx, dy))| {
        let mut line = [0; WIN_LENGTH];
        for (i, slot) in line.iter_mut().enumerate() {
            let i = i as i32;
            *slot = coord_to_index((x + dx * i) as usize, (y + dy * i) as usize, size);
        }
        line
    })
}

/// Fast win check through one field.
///
/// Only checks the 4 lines crossing `field`. No allocation.
#[inline]
pub fn has_five_at(state: &GameState, field: usize, player: Player, rule: WinRule) -> bool {
    if !state.is_owned_by(field, player) {
        return false;
    }
    let (x, y) = index_to_coord(field, state.size());
    let (x, y) = (x as i32, y as i32);
    DIRECTIONS.iter().any(|&(dx, dy)| {
        let len = 1
            + run_length(state, x + dx, y + dy, dx, dy, player)
            + run_length(state, x - dx, y - dy, -dx, -dy, player);
        rule.accepts(len)
    })
}

/// Player with a winning line, if any
pub fn winner(state: &GameState, rule: WinRule) -> Option<Player> {
    [Player::First, Player::Second]
        .into_iter()
        .find(|&p| has_five(state, p, rule))
}
