use serde::{Deserialize, Serialize};

/// Per-cell record stored in the board grid.
///
/// `is_mine` and `num_adjacent_mines` are fixed at generation time;
/// `is_revealed` only ever goes from false to true. Mutation is
/// crate-private so the engine alone upholds those invariants.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) num_adjacent_mines: u8,
    pub(crate) num_adjacent_flags: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed
    }

    /// Mines among the up to 8 Chebyshev neighbors, in 0..=8.
    pub const fn num_adjacent_mines(self) -> u8 {
        self.num_adjacent_mines
    }

    /// Flags currently placed on the up to 8 Chebyshev neighbors.
    pub const fn num_adjacent_flags(self) -> u8 {
        self.num_adjacent_flags
    }
}
