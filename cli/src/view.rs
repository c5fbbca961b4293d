//! Board-to-text rendering. The engine never renders; everything visual
//! lives here.

use std::fmt::Write as _;

use minesweep_core::{Board, Cell, GameState};

const LETTER_MAP: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Renders the board with letter-labeled columns and 1-based row numbers on
/// both sides. After a loss the full mine layout is exposed, with false
/// flags called out.
pub fn render(board: &Board, state: &GameState, delta: bool) -> String {
    let (rows, cols) = board.size();
    let mut out = String::new();

    if !state.is_dead {
        let _ = writeln!(out, "Mines left: {}", board.mines_left());
    }
    out.push('\n');

    let header = column_header(cols);
    out.push_str(&header);

    for row in 0..rows {
        let label = u16::from(row) + 1;
        let _ = write!(out, "{label:>2}   ");
        for col in 0..cols {
            out.push(cell_icon(board.cell_at((row, col)), state.is_dead, delta));
            out.push(' ');
        }
        let _ = writeln!(out, "  {label}");
    }

    out.push_str(&header);
    out
}

fn column_header(cols: u8) -> String {
    let mut line = String::from("     ");
    for col in 0..usize::from(cols) {
        line.push(LETTER_MAP[col] as char);
        line.push(' ');
    }
    line.push('\n');
    line
}

fn cell_icon(cell: Cell, is_death: bool, delta: bool) -> char {
    if is_death {
        return if cell.is_flagged() {
            // a flag on a safe cell was a false flag
            if cell.is_mine() { '>' } else { 'X' }
        } else if cell.is_mine() {
            '*'
        } else {
            ' '
        };
    }

    if cell.is_flagged() {
        '>'
    } else if cell.is_revealed() {
        let count = cell.num_adjacent_mines();
        if count == 0 {
            return '.';
        }
        let shown = if delta {
            i16::from(count) - i16::from(cell.num_adjacent_flags())
        } else {
            i16::from(count)
        };
        if shown < 0 {
            // negative deltas would need two characters and break the grid
            '!'
        } else {
            char::from_digit(shown as u32, 10).unwrap_or('?')
        }
    } else {
        '#'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_icons(board: &Board, state: &GameState, delta: bool) -> Vec<char> {
        let (rows, cols) = board.size();
        let mut icons = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                icons.push(cell_icon(board.cell_at((row, col)), state.is_dead, delta));
            }
        }
        icons
    }

    #[test]
    fn hidden_flagged_and_revealed_cells_use_distinct_icons() {
        let mut board = Board::from_mine_coords((1, 3), &[(0, 2)]).unwrap();
        let mut state = GameState::default();
        board.flag_cell(&state, (0, 2)).unwrap();
        board.reveal_cell(&mut state, (0, 1)).unwrap();

        assert_eq!(rendered_icons(&board, &state, false), ['#', '1', '>']);
    }

    #[test]
    fn zero_adjacency_cells_render_as_dots() {
        let mut board = Board::from_mine_coords((1, 3), &[]).unwrap();
        let mut state = GameState::default();
        board.reveal_cell(&mut state, (0, 0)).unwrap();

        assert_eq!(rendered_icons(&board, &state, false), ['.', '.', '.']);
    }

    #[test]
    fn delta_mode_subtracts_adjacent_flags() {
        let mut board = Board::from_mine_coords((1, 3), &[(0, 2)]).unwrap();
        let mut state = GameState::default();
        board.reveal_cell(&mut state, (0, 1)).unwrap();
        board.flag_cell(&state, (0, 0)).unwrap();
        board.flag_cell(&state, (0, 2)).unwrap();

        // 1 adjacent mine, 2 adjacent flags: negative delta clamps to '!'
        assert_eq!(cell_icon(board.cell_at((0, 1)), false, true), '!');
    }

    #[test]
    fn death_view_exposes_mines_and_false_flags() {
        let mut board = Board::from_mine_coords((1, 3), &[(0, 2)]).unwrap();
        let mut state = GameState::default();
        board.flag_cell(&state, (0, 0)).unwrap();
        board.reveal_cell(&mut state, (0, 2)).unwrap();
        assert!(state.is_dead);

        assert_eq!(rendered_icons(&board, &state, false), ['X', ' ', '*']);
    }

    #[test]
    fn render_labels_rows_and_columns() {
        let board = Board::from_mine_coords((2, 3), &[]).unwrap();
        let text = render(&board, &GameState::default(), false);

        assert!(text.contains("A B C"));
        assert!(text.contains(" 1   "));
        assert!(text.contains("Mines left: 0"));
    }
}
