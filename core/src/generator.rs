use alloc::vec::Vec;

use crate::*;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<(Board, GameState)>;
}

/// Purely random mine placement, excluding the 3×3 block centered on the
/// starting cell so the first reveal is always safe and zero-adjacent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<(Board, GameState)> {
        use rand::prelude::*;

        let (rows, cols) = config.size;
        if self.start.0 >= rows || self.start.1 >= cols {
            return Err(GameError::InvalidCoords);
        }

        let mut board = Board::with_size(config.size);

        // only cells beyond Chebyshev distance 1 from the start may hold mines
        let mut eligible: Vec<Coord2> = Vec::with_capacity(config.total_cells().into());
        for row in 0..rows {
            for col in 0..cols {
                if row.abs_diff(self.start.0) > 1 || col.abs_diff(self.start.1) > 1 {
                    eligible.push((row, col));
                }
            }
        }

        let mines = usize::from(config.mines);
        if eligible.len() < mines {
            log::warn!(
                "Cannot place {} mines, only {} cells outside the safety zone",
                config.mines,
                eligible.len()
            );
            return Err(GameError::TooManyMines);
        }

        // partial Fisher-Yates: the first `mines` slots end up holding a
        // uniform sample without replacement
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for slot in 0..mines {
            let pick = rng.random_range(slot..eligible.len());
            eligible.swap(slot, pick);
        }
        for &coords in &eligible[..mines] {
            board.place_mine(coords);
        }

        board.compute_adjacency();
        log::debug!(
            "Placed {} mines on a {}x{} board, start {:?}",
            board.mine_count(),
            rows,
            cols,
            self.start
        );

        Ok((board, GameState::default()))
    }
}

/// Builds a fresh board for `config` with mines kept out of the 3×3 block
/// centered on `start`, along with the initial game state.
pub fn new_game(config: GameConfig, start: Coord2, seed: u64) -> Result<(Board, GameState)> {
    RandomBoardGenerator::new(seed, start).generate(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_coords(board: &Board) -> alloc::vec::Vec<Coord2> {
        let (rows, cols) = board.size();
        let mut coords = alloc::vec::Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if board[(row, col)].is_mine() {
                    coords.push((row, col));
                }
            }
        }
        coords
    }

    #[test]
    fn places_exactly_the_requested_mine_count() {
        let config = GameConfig::new((8, 8), 10);
        let (board, state) = new_game(config, (3, 4), 7).unwrap();

        assert_eq!(mine_coords(&board).len(), 10);
        assert_eq!(board.mine_count(), 10);
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn start_safety_zone_is_mine_free() {
        let start = (4, 4);
        let (board, _) = new_game(GameConfig::new((8, 8), 10), start, 99).unwrap();

        for (row, col) in mine_coords(&board) {
            assert!(
                row.abs_diff(start.0) > 1 || col.abs_diff(start.1) > 1,
                "mine at ({row}, {col}) inside the safety zone"
            );
        }
    }

    #[test]
    fn adjacency_counts_match_actual_neighbors() {
        let (board, _) = new_game(GameConfig::new((8, 8), 10), (0, 0), 3).unwrap();
        let (rows, cols) = board.size();

        for row in 0..rows {
            for col in 0..cols {
                if board[(row, col)].is_mine() {
                    continue;
                }
                let expected = board
                    .adjacent_cells((row, col))
                    .filter(|&pos| board[pos].is_mine())
                    .count() as u8;
                assert_eq!(board[(row, col)].num_adjacent_mines(), expected);
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_board() {
        let config = GameConfig::new((8, 8), 10);
        let (first, _) = new_game(config, (2, 2), 42).unwrap();
        let (second, _) = new_game(config, (2, 2), 42).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn fails_when_the_safety_zone_leaves_no_room() {
        // the 3x3 zone around the center covers the whole board
        let result = new_game(GameConfig::new((3, 3), 1), (1, 1), 0);

        assert_eq!(result, Err(GameError::TooManyMines));
    }

    #[test]
    fn rejects_out_of_bounds_start() {
        let result = new_game(GameConfig::new((8, 8), 10), (8, 0), 0);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    #[test]
    fn corner_start_leaves_enough_room_on_a_small_board() {
        // only a 2x2 block is cut off, 5 eligible cells remain
        let (board, _) = new_game(GameConfig::new((3, 3), 5), (0, 0), 11).unwrap();

        assert_eq!(board.mine_count(), 5);
        assert!(!board[(0, 0)].is_mine());
    }
}
