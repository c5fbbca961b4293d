use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

impl Board {
    /// Reveals the cell at `coords`, flood-filling through its connected
    /// zero-adjacency region, and updates `state` on a mine hit or a win.
    ///
    /// Revealing a flagged cell drops the flag first so neighbor flag
    /// counts stay consistent. On a terminal state this is a no-op.
    pub fn reveal_cell(&mut self, state: &mut GameState, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.validate_coords(coords)?;

        if state.is_terminal() || self[coords].is_revealed {
            return Ok(NoChange);
        }

        if self[coords].is_flagged {
            self.clear_flag(coords);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;

        if cell.is_mine {
            state.is_dead = true;
            log::debug!("Mine hit at {:?}", coords);
            return Ok(HitMine);
        }

        if cell.num_adjacent_mines == 0 {
            self.flood_reveal(coords);
        }

        if self.is_solved() {
            state.has_won = true;
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Worklist flood fill across the connected zero-adjacency region,
    /// stopping at nonzero counts and flagged cells. Iterative, so the
    /// region size never translates into call-stack depth.
    fn flood_reveal(&mut self, origin: Coord2) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self
            .adjacent_cells(origin)
            .filter(|&pos| self[pos].is_unrevealed() && !self[pos].is_flagged)
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            if self[visit_coords].is_revealed || self[visit_coords].is_flagged {
                continue;
            }

            self.cells[visit_coords.to_nd_index()].is_revealed = true;
            log::trace!("Flood revealed {:?}", visit_coords);

            if self[visit_coords].num_adjacent_mines == 0 {
                to_visit.extend(
                    self.adjacent_cells(visit_coords)
                        .filter(|&pos| self[pos].is_unrevealed() && !self[pos].is_flagged)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Places a flag and increments `num_adjacent_flags` on every in-bounds
    /// neighbor. No-op on terminal state, on a revealed cell, and on a cell
    /// that is already flagged.
    pub fn flag_cell(&mut self, state: &GameState, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        if state.is_terminal() || self[coords].is_revealed || self[coords].is_flagged {
            return Ok(NoChange);
        }

        self.cells[coords.to_nd_index()].is_flagged = true;
        self.flagged_count += 1;
        for pos in self.adjacent_cells(coords) {
            self.cells[pos.to_nd_index()].num_adjacent_flags += 1;
        }

        Ok(Changed)
    }

    /// Removes a flag and decrements `num_adjacent_flags` on every in-bounds
    /// neighbor. No-op on terminal state and on a cell that is not flagged.
    pub fn unflag_cell(&mut self, state: &GameState, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        if state.is_terminal() || !self[coords].is_flagged {
            return Ok(NoChange);
        }

        self.clear_flag(coords);
        Ok(Changed)
    }

    fn clear_flag(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].is_flagged = false;
        self.flagged_count -= 1;
        for pos in self.adjacent_cells(coords) {
            self.cells[pos.to_nd_index()].num_adjacent_flags -= 1;
        }
    }

    /// True iff every cell is revealed or a mine.
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_revealed || cell.is_mine)
    }
}
