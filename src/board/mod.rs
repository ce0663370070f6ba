//! Board representation for the engine
//!
//! Fields are addressed by 1-based linear indices `1..=N²`, where `N` is the
//! board size passed at runtime. The game state keeps two binary cells per
//! field, one per player, packed into a bitset.

pub mod bitboard;
pub mod coord;
pub mod state;
pub mod symmetry;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use coord::{center_field, coord_to_index, in_bounds, index_to_coord};
pub use state::{GameState, TrialMove};
pub use symmetry::{canonical_fields, classify, Symmetry, SymmetryChain, ORIENTATIONS};

use crate::error::{Error, Result};

/// Largest supported board side
pub const MAX_BOARD_SIZE: usize = 255;

/// Player slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Slot 0, moves first
    First,
    /// Slot 1
    Second,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Offset of this player's cell within a field's cell pair
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    pub fn from_slot(slot: u8) -> Result<Self> {
        match slot {
            0 => Ok(Player::First),
            1 => Ok(Player::Second),
            other => Err(Error::InvalidPlayerSlot(other)),
        }
    }

    /// Player owning a given state cell
    #[inline]
    pub fn of_cell(cell: usize) -> Player {
        if cell % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }
}

/// State cell holding `player`'s occupancy of `field`.
#[inline]
pub fn cell_index(field: usize, player: Player) -> usize {
    debug_assert!(field >= 1);
    2 * (field - 1) + player.slot()
}

/// Field that a state cell belongs to.
#[inline]
pub fn field_of_cell(cell: usize) -> usize {
    cell / 2 + 1
}
