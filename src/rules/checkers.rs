//! Geometric pattern checkers
//!
//! Deterministic tactical formulas for one field, built for any board size:
//! - four in line: playing the field completes a winning five
//! - three in line: playing the field makes a four with an open end
//! - nearby: the field touches an occupied neighbour
//!
//! Every line formula is a conjunction of unit clauses over one window of
//! the line through the field, written once per player.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{coord_to_index, GameState, Player};
//! use gomoku::rules::{checkers, WinRule};
//!
//! let mut state = GameState::new(15);
//! for x in 4..=7 {
//!     state.place(coord_to_index(x, 8, 15), Player::First).unwrap();
//! }
//! let field = coord_to_index(8, 8, 15);
//! let fours = checkers::four_in_line(field, 15, WinRule::Exact);
//! assert!(fours.iter().any(|f| f.is_satisfied(&state)));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::formula::{Clause, Formula, FormulaSet, Literal};
use super::win::{WinRule, DIRECTIONS, WIN_LENGTH};
use super::PatternKind;
use crate::board::{cell_index, coord_to_index, in_bounds, index_to_coord, Player};
use crate::error::{Error, Result};

const PLAYERS: [Player; 2] = [Player::First, Player::Second];

/// One direction of the line through a field
struct Line {
    size: usize,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl Line {
    fn new(field: usize, size: usize, (dx, dy): (i32, i32)) -> Self {
        let (x, y) = index_to_coord(field, size);
        Self {
            size,
            x: x as i32,
            y: y as i32,
            dx,
            dy,
        }
    }

    /// Field `k` steps from the origin, if on the board
    #[inline]
    fn at(&self, k: i32) -> Option<usize> {
        let (x, y) = (self.x + self.dx * k, self.y + self.dy * k);
        in_bounds(x, y, self.size).then(|| coord_to_index(x as usize, y as usize, self.size))
    }

    /// Fields at offsets `start..=end` except the origin, if all on the board
    fn window(&self, start: i32, end: i32) -> Option<Vec<usize>> {
        (start..=end).filter(|&k| k != 0).map(|k| self.at(k)).collect()
    }
}

fn own(fields: &[usize], player: Player) -> impl Iterator<Item = Literal> + '_ {
    fields
        .iter()
        .map(move |&f| Literal::positive(cell_index(f, player)))
}

/// Formulas satisfied when playing `field` completes a winning line
pub fn four_in_line(field: usize, size: usize, rule: WinRule) -> Vec<Formula> {
    let span = WIN_LENGTH as i32 - 1;
    let mut formulas = Vec::new();
    for dir in DIRECTIONS {
        let line = Line::new(field, size, dir);
        for start in -span..=0 {
            let Some(others) = line.window(start, start + span) else {
                continue;
            };
            let bounds: Vec<usize> = match rule {
                WinRule::Exact => [start - 1, start + span + 1]
                    .into_iter()
                    .filter_map(|k| line.at(k))
                    .collect(),
                WinRule::Freestyle => Vec::new(),
            };
            for player in PLAYERS {
                let literals = own(&others, player).chain(
                    bounds
                        .iter()
                        .map(move |&f| Literal::negative(cell_index(f, player))),
                );
                formulas.push(Formula::conjunction(literals));
            }
        }
    }
    formulas
}

/// Formulas satisfied when playing `field` makes four with an open end.
///
/// The open end must not hold an opponent stone; under [`WinRule::Exact`]
/// the fields just past the resulting five must not hold own stones.
pub fn three_in_line(field: usize, size: usize, rule: WinRule) -> Vec<Formula> {
    let span = WIN_LENGTH as i32 - 2;
    let mut formulas = Vec::new();
    for dir in DIRECTIONS {
        let line = Line::new(field, size, dir);
        for start in -span..=0 {
            let end = start + span;
            let Some(others) = line.window(start, end) else {
                continue;
            };
            for open in [start - 1, end + 1] {
                let Some(open_field) = line.at(open) else {
                    continue;
                };
                let beyond: Vec<usize> = match rule {
                    WinRule::Exact => [start.min(open) - 1, end.max(open) + 1]
                        .into_iter()
                        .filter_map(|k| line.at(k))
                        .collect(),
                    WinRule::Freestyle => Vec::new(),
                };
                for player in PLAYERS {
                    let literals = own(&others, player)
                        .chain(std::iter::once(Literal::negative(cell_index(
                            open_field,
                            player.opponent(),
                        ))))
                        .chain(
                            beyond
                                .iter()
                                .map(move |&f| Literal::negative(cell_index(f, player))),
                        );
                    formulas.push(Formula::conjunction(literals));
                }
            }
        }
    }
    formulas
}

/// Single-clause formula satisfied when any neighbour of `field` is taken.
///
/// `None` on a 1×1 board.
pub fn nearby(field: usize, size: usize) -> Option<Formula> {
    let (x, y) = index_to_coord(field, size);
    let (x, y) = (x as i32, y as i32);
    let mut literals = Vec::with_capacity(16);
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            if (nx, ny) == (x, y) || !in_bounds(nx, ny, size) {
                continue;
            }
            let neighbour = coord_to_index(nx as usize, ny as usize, size);
            for player in PLAYERS {
                literals.push(Literal::positive(cell_index(neighbour, player)));
            }
        }
    }
    (!literals.is_empty()).then(|| Formula::new(vec![Clause::new(literals)]))
}

/// Split formulas into sets of equal clause count, smallest count first
pub fn group_by_clause_count(formulas: Vec<Formula>) -> Vec<FormulaSet> {
    let mut groups: BTreeMap<usize, Vec<Formula>> = BTreeMap::new();
    for formula in formulas {
        groups.entry(formula.clauses.len()).or_default().push(formula);
    }
    groups
        .into_iter()
        .map(|(clauses, formulas)| FormulaSet::new(clauses, formulas))
        .collect()
}

/// All checker sets of one field
pub fn field_checkers(field: usize, size: usize, rule: WinRule) -> Vec<(PatternKind, FormulaSet)> {
    let mut sets = Vec::new();
    for set in group_by_clause_count(four_in_line(field, size, rule)) {
        sets.push((PatternKind::Four, set));
    }
    for set in group_by_clause_count(three_in_line(field, size, rule)) {
        sets.push((PatternKind::Three, set));
    }
    if let Some(formula) = nearby(field, size) {
        sets.push((PatternKind::Nearby, FormulaSet::new(1, vec![formula])));
    }
    sets
}

/// File tag for a checker set, as in `{field}_{tag}.cnf`
pub fn file_tag(kind: PatternKind, clause_count: usize) -> String {
    match kind {
        PatternKind::Four => format!("4_checker_{clause_count}cl"),
        PatternKind::Three => format!("3_checker_{clause_count}cl"),
        PatternKind::Nearby => "nearby_field_checker".to_string(),
        PatternKind::Other => format!("other_{clause_count}cl"),
    }
}

/// Write every field's checkers under `dir/additional/`.
///
/// Returns the number of files written.
pub fn write_library(dir: &Path, size: usize, rule: WinRule) -> Result<usize> {
    let out = dir.join("additional");
    fs::create_dir_all(&out).map_err(|source| Error::Io {
        path: out.clone(),
        source,
    })?;

    let mut written = 0;
    for field in 1..=size * size {
        for (kind, set) in field_checkers(field, size, rule) {
            let tag = file_tag(kind, set.clause_count);
            let path = out.join(format!("{field}_{tag}.cnf"));
            let text = format!(
                "c {field}_{tag}.cnf\nc\nc field = {field}\nc formula set type = {tag}\nc\n{set}"
            );
            fs::write(&path, text).map_err(|source| Error::Io { path, source })?;
            written += 1;
        }
    }
    tracing::debug!(size, files = written, "wrote checker library");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameState;
    use crate::rules::win::has_five_at;

    fn place_all(state: &mut GameState, coords: &[(usize, usize)], player: Player) {
        let size = state.size();
        for &(x, y) in coords {
            state.place(coord_to_index(x, y, size), player).unwrap();
        }
    }

    fn any_satisfied(formulas: &[Formula], state: &GameState) -> bool {
        formulas.iter().any(|f| f.is_satisfied(state))
    }

    #[test]
    fn test_four_in_line_counts_at_center() {
        let center = coord_to_index(8, 8, 15);
        let fours = four_in_line(center, 15, WinRule::Exact);
        // 4 directions x 5 windows x 2 players
        assert_eq!(fours.len(), 40);
        let sets = group_by_clause_count(fours);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].clause_count, 6);

        let free = four_in_line(center, 15, WinRule::Freestyle);
        assert!(free.iter().all(|f| f.clauses.len() == 4));
    }

    #[test]
    fn test_four_in_line_at_corner() {
        let fours = four_in_line(1, 15, WinRule::Exact);
        // one window per direction, the anti-diagonal leaves the board
        assert_eq!(fours.len(), 6);
        assert!(fours.iter().all(|f| f.clauses.len() == 5));
    }

    #[test]
    fn test_four_in_line_matches_win_check() {
        let mut state = GameState::new(9);
        place_all(&mut state, &[(2, 5), (3, 5), (4, 5), (5, 5), (1, 1), (2, 2), (4, 4)], Player::First);
        place_all(&mut state, &[(7, 5), (6, 6), (6, 7), (6, 8), (6, 9), (3, 3)], Player::Second);

        for rule in [WinRule::Exact, WinRule::Freestyle] {
            let empty: Vec<_> = state.empty_fields().collect();
            for field in empty {
                let fours = four_in_line(field, 9, rule);
                for player in PLAYERS {
                    let mine: Vec<_> = fours
                        .iter()
                        .filter(|f| f.owner() == Some(player))
                        .cloned()
                        .collect();
                    let predicted = any_satisfied(&mine, &state);
                    let mut trial = state.clone();
                    trial.place(field, player).unwrap();
                    assert_eq!(
                        predicted,
                        has_five_at(&trial, field, player, rule),
                        "field {field} {player:?} {rule:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_four_in_line_overline() {
        let mut state = GameState::new(15);
        place_all(&mut state, &[(3, 8), (4, 8), (5, 8), (6, 8), (7, 8)], Player::First);
        let field = coord_to_index(8, 8, 15);
        assert!(!any_satisfied(&four_in_line(field, 15, WinRule::Exact), &state));
        assert!(any_satisfied(&four_in_line(field, 15, WinRule::Freestyle), &state));
    }

    #[test]
    fn test_three_in_line_open_and_closed() {
        let mut state = GameState::new(15);
        place_all(&mut state, &[(5, 8), (6, 8), (7, 8)], Player::First);
        let field = coord_to_index(8, 8, 15);
        let threes = three_in_line(field, 15, WinRule::Exact);
        assert!(any_satisfied(&threes, &state));

        place_all(&mut state, &[(4, 8), (9, 8)], Player::Second);
        assert!(!any_satisfied(&threes, &state));
    }

    #[test]
    fn test_three_in_line_belongs_to_player() {
        let mut state = GameState::new(15);
        place_all(&mut state, &[(8, 5), (8, 6), (8, 7)], Player::Second);
        let field = coord_to_index(8, 8, 15);
        let satisfied: Vec<_> = three_in_line(field, 15, WinRule::Exact)
            .into_iter()
            .filter(|f| f.is_satisfied(&state))
            .collect();
        assert!(!satisfied.is_empty());
        assert!(satisfied.iter().all(|f| f.owner() == Some(Player::Second)));
    }

    #[test]
    fn test_nearby() {
        let center = coord_to_index(8, 8, 15);
        let formula = nearby(center, 15).unwrap();
        assert_eq!(formula.clauses.len(), 1);
        assert_eq!(formula.clauses[0].literals.len(), 16);
        assert_eq!(nearby(1, 15).unwrap().clauses[0].literals.len(), 6);
        assert!(nearby(1, 1).is_none());

        let mut state = GameState::new(15);
        assert!(!formula.is_satisfied(&state));
        state.place(coord_to_index(9, 9, 15), Player::Second).unwrap();
        assert!(formula.is_satisfied(&state));
    }

    #[test]
    fn test_field_checkers_kinds() {
        let sets = field_checkers(coord_to_index(8, 8, 15), 15, WinRule::Exact);
        assert!(sets.iter().any(|(k, _)| *k == PatternKind::Four));
        assert!(sets.iter().any(|(k, _)| *k == PatternKind::Three));
        assert_eq!(sets.iter().filter(|(k, _)| *k == PatternKind::Nearby).count(), 1);
        assert!(sets.iter().all(|(_, s)| s.formulas.iter().all(|f| f.clauses.len() == s.clause_count)));
    }

    #[test]
    fn test_write_library() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_library(dir.path(), 5, WinRule::Exact).unwrap();
        assert!(written >= 25);

        let text = fs::read_to_string(dir.path().join("additional/13_nearby_field_checker.cnf")).unwrap();
        assert!(text.starts_with("c 13_nearby_field_checker.cnf\n"));
        let set = FormulaSet::parse(&text).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_file_tags() {
        assert_eq!(file_tag(PatternKind::Four, 6), "4_checker_6cl");
        assert_eq!(PatternKind::from_file_tag(&file_tag(PatternKind::Three, 5)), PatternKind::Three);
        assert_eq!(
            PatternKind::from_file_tag(&file_tag(PatternKind::Nearby, 1)),
            PatternKind::Nearby
        );
    }
}
