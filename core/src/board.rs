use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The playing grid: an arena of [`Cell`] records addressed by `(row, col)`,
/// plus the mine and flag tallies the engine keeps current.
///
/// Created once per game by the generator, mutated exclusively through the
/// engine operations, and discarded wholesale on a new game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) cells: Array2<Cell>,
    pub(crate) mine_count: CellCount,
    pub(crate) flagged_count: CellCount,
}

impl Board {
    pub(crate) fn with_size(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
            flagged_count: 0,
        }
    }

    /// Builds a board with mines at exactly the given coordinates and the
    /// adjacency counts precomputed. Duplicate coordinates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::with_size(size);

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            board.place_mine(coords);
        }

        board.compute_adjacency();
        Ok(board)
    }

    pub(crate) fn place_mine(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_mine {
            cell.is_mine = true;
            self.mine_count += 1;
        }
    }

    /// Fills `num_adjacent_mines` for every non-mine cell. Runs once, after
    /// all mines are placed.
    pub(crate) fn compute_adjacency(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                if self[(row, col)].is_mine {
                    continue;
                }
                let count = self.adjacent_mine_count((row, col));
                self.cells[(row, col).to_nd_index()].num_adjacent_mines = count;
            }
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet. Negative when the player
    /// has placed more flags than there are mines (false flags).
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent_cells(coords)
            .filter(|&pos| self[pos].is_mine)
            .count()
            .try_into()
            .unwrap()
    }

    /// The up to 8 in-bounds Chebyshev neighbors of `coords`, row-major.
    pub fn adjacent_cells(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}
