//! Game state: two occupancy cells per field
//!
//! Cell `2·(f-1)+p` is set iff player `p` occupies field `f`. A field never
//! has both of its cells set.

use std::ops::{Deref, DerefMut};

use super::bitboard::Bitboard;
use super::{cell_index, field_of_cell, Player, MAX_BOARD_SIZE};
use crate::error::{Error, Result};

/// Occupancy of an N×N board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    size: usize,
    cells: Bitboard,
}

impl GameState {
    /// Empty state for an N×N board
    ///
    /// # Panics
    ///
    /// If `size` is 0 or above [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} out of range"
        );
        Self {
            size,
            cells: Bitboard::new(2 * size * size),
        }
    }

    /// Build a state from a raw cell sequence of length `2·size²`.
    ///
    /// ```
    /// use gomoku::board::GameState;
    ///
    /// let mut cells = vec![0u8; 2 * 5 * 5];
    /// cells[1] = 1; // player 1 on field 1
    /// let state = GameState::from_cells(5, &cells).unwrap();
    /// assert_eq!(state.stone_count(), 1);
    /// assert_eq!(state.to_cells(), cells);
    /// ```
    pub fn from_cells(size: usize, cells: &[u8]) -> Result<Self> {
        if !(1..=MAX_BOARD_SIZE).contains(&size) {
            return Err(Error::InvalidConfig {
                message: format!("board size {size} outside 1..={MAX_BOARD_SIZE}"),
            });
        }
        let mut state = Self::new(size);
        let expected = state.cell_count();
        if cells.len() != expected {
            return Err(Error::InvalidStateLength {
                expected,
                got: cells.len(),
            });
        }
        for (cell, &value) in cells.iter().enumerate() {
            match value {
                0 => {}
                1 => state.cells.set(cell),
                _ => return Err(Error::InvalidCellValue { cell, value }),
            }
        }
        for field in 1..=size * size {
            if state.cells.get(cell_index(field, Player::First))
                && state.cells.get(cell_index(field, Player::Second))
            {
                return Err(Error::FieldDoublyOccupied { field });
            }
        }
        Ok(state)
    }

    /// Export as a raw 0/1 cell sequence
    pub fn to_cells(&self) -> Vec<u8> {
        (0..self.cell_count()).map(|c| u8::from(self.cells.get(c))).collect()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of fields (`N²`)
    #[inline]
    pub fn field_count(&self) -> usize {
        self.size * self.size
    }

    /// Number of cells (`2·N²`)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw cell value
    #[inline]
    pub fn cell(&self, cell: usize) -> bool {
        self.cells.get(cell)
    }

    #[inline]
    pub fn is_valid_field(&self, field: usize) -> bool {
        (1..=self.field_count()).contains(&field)
    }

    /// Get the player occupying a field
    #[inline]
    pub fn occupant(&self, field: usize) -> Option<Player> {
        if self.cells.get(cell_index(field, Player::First)) {
            Some(Player::First)
        } else if self.cells.get(cell_index(field, Player::Second)) {
            Some(Player::Second)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_occupied(&self, field: usize) -> bool {
        self.occupant(field).is_some()
    }

    #[inline]
    pub fn is_owned_by(&self, field: usize, player: Player) -> bool {
        self.cells.get(cell_index(field, player))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.cells.count()
    }

    /// Check if no stone has been placed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.field_count()
    }

    /// Occupied fields in ascending order
    pub fn occupied_fields(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter_ones().map(field_of_cell)
    }

    /// Fields occupied by one player, ascending
    pub fn player_fields(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter_ones()
            .filter(move |&c| Player::of_cell(c) == player)
            .map(field_of_cell)
    }

    /// Empty fields in ascending order
    pub fn empty_fields(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.field_count()).filter(|&f| !self.is_occupied(f))
    }

    /// Place a stone for a game move.
    pub fn place(&mut self, field: usize, player: Player) -> Result<()> {
        if !self.is_valid_field(field) {
            return Err(Error::InvalidField {
                field,
                size: self.size,
            });
        }
        if self.is_occupied(field) {
            return Err(Error::FieldOccupied { field });
        }
        self.cells.set(cell_index(field, player));
        Ok(())
    }

    /// Copy of this state with one extra stone
    pub fn with_move(&self, field: usize, player: Player) -> Result<Self> {
        let mut next = self.clone();
        next.place(field, player)?;
        Ok(next)
    }

    /// Place a stone that is removed again when the returned guard drops.
    #[inline]
    pub fn trial(&mut self, field: usize, player: Player) -> TrialMove<'_> {
        TrialMove::new(self, field, player)
    }

    #[inline]
    pub(crate) fn set_cell(&mut self, cell: usize) {
        self.cells.set(cell);
    }
}

/// Scoped stone placement used during search.
///
/// Derefs to the state with the stone placed; dropping the guard clears the
/// cell again, on every exit path of the caller.
pub struct TrialMove<'a> {
    state: &'a mut GameState,
    cell: usize,
}

impl<'a> TrialMove<'a> {
    pub fn new(state: &'a mut GameState, field: usize, player: Player) -> Self {
        debug_assert!(state.is_valid_field(field) && !state.is_occupied(field));
        let cell = cell_index(field, player);
        state.cells.set(cell);
        Self { state, cell }
    }
}

impl Deref for TrialMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.state.cells.clear(self.cell);
    }
}
