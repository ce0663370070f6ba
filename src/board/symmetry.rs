//! Board reflections and the canonical wedge
//!
//! Rules are stored for one representative per symmetry orbit: the wedge
//! `x ≤ y ≤ ⌈N/2⌉` in the upper-left corner, roughly an eighth of the board.
//! [`classify`] finds the reflections that carry any field into that wedge,
//! and [`ORIENTATIONS`] enumerates all 8 orientations of the square so that
//! pattern matches can be found whichever way the board is turned.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{classify, index_to_coord};
//!
//! // Bottom-right corner of a 15x15 board maps onto the top-left corner
//! let chain = classify(225, 15);
//! assert_eq!(index_to_coord(chain.apply_field(225, 15), 15), (1, 1));
//! assert_eq!(chain.revert_field(1, 15), 225);
//! ```

use super::coord::{coord_to_index, index_to_coord};
use super::{cell_index, field_of_cell, GameState, Player};

/// Base reflections of the square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    /// Mirror across the vertical axis: `(N-x+1, y)`
    Vertical,
    /// Mirror across the horizontal axis: `(x, N-y+1)`
    Horizontal,
    /// Main diagonal: `(y, x)`
    Diagonal1,
    /// Anti-diagonal: `(N-y+1, N-x+1)`
    Diagonal2,
}

impl Symmetry {
    /// Reflect a field. Every reflection is its own inverse.
    #[inline]
    pub fn apply_field(self, field: usize, size: usize) -> usize {
        let (x, y) = index_to_coord(field, size);
        let (nx, ny) = match self {
            Symmetry::Identity => return field,
            Symmetry::Vertical => (size - x + 1, y),
            Symmetry::Horizontal => (x, size - y + 1),
            Symmetry::Diagonal1 => (y, x),
            Symmetry::Diagonal2 => (size - y + 1, size - x + 1),
        };
        coord_to_index(nx, ny, size)
    }

    /// Short label used in logs
    pub fn label(self) -> &'static str {
        match self {
            Symmetry::Identity => "t",
            Symmetry::Vertical => "v",
            Symmetry::Horizontal => "h",
            Symmetry::Diagonal1 => "d1",
            Symmetry::Diagonal2 => "d2",
        }
    }
}

/// Up to two reflections applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetryChain {
    steps: [Symmetry; 2],
    len: u8,
}

impl SymmetryChain {
    pub const fn single(step: Symmetry) -> Self {
        Self {
            steps: [step, Symmetry::Identity],
            len: 1,
        }
    }

    pub const fn pair(first: Symmetry, second: Symmetry) -> Self {
        Self {
            steps: [first, second],
            len: 2,
        }
    }

    #[inline]
    pub fn steps(&self) -> &[Symmetry] {
        &self.steps[..self.len as usize]
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.steps().iter().all(|&s| s == Symmetry::Identity)
    }

    /// Apply the chain front to back
    #[inline]
    pub fn apply_field(&self, field: usize, size: usize) -> usize {
        self.steps()
            .iter()
            .fold(field, |f, step| step.apply_field(f, size))
    }

    /// Undo [`apply_field`](Self::apply_field): the steps back to front
    #[inline]
    pub fn revert_field(&self, field: usize, size: usize) -> usize {
        self.steps()
            .iter()
            .rev()
            .fold(field, |f, step| step.apply_field(f, size))
    }

    /// Re-map every occupied cell, keeping its player
    pub fn apply_state(&self, state: &GameState) -> GameState {
        if self.is_identity() {
            return state.clone();
        }
        let size = state.size();
        let mut out = GameState::new(size);
        for field in state.occupied_fields() {
            let player = match state.occupant(field) {
                Some(p) => p,
                None => continue,
            };
            let mapped = self.apply_field(field, size);
            out.set_cell(cell_index(mapped, player));
        }
        out
    }

    /// Map a single state cell through the chain
    #[inline]
    pub fn apply_cell(&self, cell: usize, size: usize) -> usize {
        let player = Player::of_cell(cell);
        cell_index(self.apply_field(field_of_cell(cell), size), player)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.steps().iter().map(|s| s.label()).collect()
    }
}

/// All 8 orientations of the square
pub const ORIENTATIONS: [SymmetryChain; 8] = [
    SymmetryChain::single(Symmetry::Identity),
    SymmetryChain::single(Symmetry::Vertical),
    SymmetryChain::single(Symmetry::Horizontal),
    SymmetryChain::single(Symmetry::Diagonal1),
    SymmetryChain::single(Symmetry::Diagonal2),
    SymmetryChain::pair(Symmetry::Vertical, Symmetry::Diagonal1),
    SymmetryChain::pair(Symmetry::Horizontal, Symmetry::Vertical),
    SymmetryChain::pair(Symmetry::Horizontal, Symmetry::Diagonal1),
];

/// Fields of the canonical wedge, row by row
pub fn canonical_fields(size: usize) -> Vec<usize> {
    let center = size.div_ceil(2);
    let mut fields = Vec::with_capacity(center * (center + 1) / 2);
    for y in 1..=center {
        for x in 1..=y {
            fields.push(coord_to_index(x, y, size));
        }
    }
    fields
}

/// Check whether a field lies in the canonical wedge
#[inline]
pub fn is_canonical(field: usize, size: usize) -> bool {
    let (x, y) = index_to_coord(field, size);
    x <= y && y <= size.div_ceil(2)
}

/// Reflections carrying `field` into the canonical wedge.
///
/// On odd boards the centre row and column resolve to a single reflection.
pub fn classify(field: usize, size: usize) -> SymmetryChain {
    use Symmetry::*;

    let (x, y) = index_to_coord(field, size);
    let half = size / 2;

    if size % 2 == 1 {
        let mid = half + 1;
        if y == mid {
            return SymmetryChain::single(if x <= mid { Identity } else { Vertical });
        }
        if x == mid {
            return SymmetryChain::single(if y < mid { Diagonal1 } else { Diagonal2 });
        }
    }

    let left = x <= half;
    let top = y <= half;
    match (left, top) {
        (true, true) => SymmetryChain::single(if y >= x { Identity } else { Diagonal1 }),
        (false, true) => {
            if y > size - x {
                SymmetryChain::single(Vertical)
            } else {
                SymmetryChain::pair(Vertical, Diagonal1)
            }
        }
        (false, false) => {
            if y >= x {
                SymmetryChain::single(Diagonal2)
            } else {
                SymmetryChain::pair(Horizontal, Vertical)
            }
        }
        (true, false) => {
            if y > size - x + 1 {
                SymmetryChain::pair(Horizontal, Diagonal1)
            } else {
                SymmetryChain::single(Horizontal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [Symmetry; 5] = [
        Symmetry::Identity,
        Symmetry::Vertical,
        Symmetry::Horizontal,
        Symmetry::Diagonal1,
        Symmetry::Diagonal2,
    ];

    #[test]
    fn test_reflections_are_involutions() {
        for size in [1, 2, 5, 6, 15] {
            for sym in BASE {
                for f in 1..=size * size {
                    assert_eq!(sym.apply_field(sym.apply_field(f, size), size), f);
                }
            }
        }
    }

    #[test]
    fn test_reflection_formulas() {
        // (2, 1) on a 5x5 board is field 2
        assert_eq!(index_to_coord(Symmetry::Vertical.apply_field(2, 5), 5), (4, 1));
        assert_eq!(index_to_coord(Symmetry::Horizontal.apply_field(2, 5), 5), (2, 5));
        assert_eq!(index_to_coord(Symmetry::Diagonal1.apply_field(2, 5), 5), (1, 2));
        assert_eq!(index_to_coord(Symmetry::Diagonal2.apply_field(2, 5), 5), (5, 4));
    }

    #[test]
    fn test_classify_lands_in_wedge() {
        for size in 1..=16 {
            for f in 1..=size * size {
                let chain = classify(f, size);
                let canonical = chain.apply_field(f, size);
                assert!(
                    is_canonical(canonical, size),
                    "size {size}: field {f} via {:?} -> {canonical}",
                    chain.labels()
                );
                assert_eq!(chain.revert_field(canonical, size), f);
            }
        }
    }

    #[test]
    fn test_classify_odd_center_lines() {
        // 15x15: centre is (8, 8)
        assert_eq!(classify(113, 15).labels(), vec!["t"]);
        assert_eq!(classify(coord_to_index(12, 8, 15), 15).labels(), vec!["v"]);
        assert_eq!(classify(coord_to_index(8, 3, 15), 15).labels(), vec!["d1"]);
        assert_eq!(classify(coord_to_index(8, 12, 15), 15).labels(), vec!["d2"]);
    }

    #[test]
    fn test_classify_quadrants() {
        assert_eq!(classify(coord_to_index(2, 5, 15), 15).labels(), vec!["t"]);
        assert_eq!(classify(coord_to_index(5, 2, 15), 15).labels(), vec!["d1"]);
        assert_eq!(classify(coord_to_index(14, 1, 15), 15).labels(), vec!["v", "d1"]);
        assert_eq!(classify(coord_to_index(10, 7, 15), 15).labels(), vec!["v"]);
        assert_eq!(classify(coord_to_index(14, 10, 15), 15).labels(), vec!["h", "v"]);
        assert_eq!(classify(coord_to_index(10, 14, 15), 15).labels(), vec!["d2"]);
        assert_eq!(classify(coord_to_index(2, 15, 15), 15).labels(), vec!["h", "d1"]);
        assert_eq!(classify(coord_to_index(6, 9, 15), 15).labels(), vec!["h"]);
    }

    #[test]
    fn test_orientations_cover_every_field() {
        for size in [5, 6, 15] {
            let mut seen = vec![false; size * size + 1];
            for chain in ORIENTATIONS {
                for f in canonical_fields(size) {
                    seen[chain.revert_field(f, size)] = true;
                }
            }
            assert!(seen[1..].iter().all(|&s| s), "size {size}");
        }
    }

    #[test]
    fn test_orientations_are_distinct() {
        let probe = coord_to_index(2, 1, 5);
        let images: std::collections::HashSet<_> = ORIENTATIONS
            .iter()
            .map(|c| c.apply_field(probe, 5))
            .collect();
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn test_canonical_fields_count() {
        assert_eq!(canonical_fields(15).len(), 36);
        assert_eq!(canonical_fields(6).len(), 6);
        assert_eq!(canonical_fields(1), vec![1]);
        assert!(canonical_fields(15).iter().all(|&f| is_canonical(f, 15)));
    }

    #[test]
    fn test_apply_state_keeps_players() {
        let mut state = GameState::new(5);
        state.place(1, Player::First).unwrap();
        state.place(2, Player::Second).unwrap();

        let chain = SymmetryChain::single(Symmetry::Vertical);
        let mirrored = chain.apply_state(&state);
        assert_eq!(mirrored.occupant(5), Some(Player::First));
        assert_eq!(mirrored.occupant(4), Some(Player::Second));
        assert_eq!(mirrored.stone_count(), 2);

        let back = chain.apply_state(&mirrored);
        assert_eq!(back, state);
    }

    #[test]
    fn test_chain_state_round_trip() {
        let mut state = GameState::new(6);
        state.place(3, Player::First).unwrap();
        state.place(17, Player::Second).unwrap();
        state.place(30, Player::First).unwrap();

        for chain in ORIENTATIONS {
            let mut restored = chain.apply_state(&state);
            for step in chain.steps().iter().rev() {
                restored = SymmetryChain::single(*step).apply_state(&restored);
            }
            assert_eq!(restored, state, "{:?}", chain.labels());
        }
    }

    #[test]
    fn test_apply_cell() {
        let chain = SymmetryChain::single(Symmetry::Vertical);
        // player 1 on field 1 of a 5x5 board -> player 1 on field 5
        assert_eq!(chain.apply_cell(1, 5), 9);
    }
}
