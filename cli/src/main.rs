use std::io::{self, Write as _};

use anyhow::{Context, bail};
use clap::Parser;
use minesweep_core::{Board, Coord2, GameConfig, GameState, RevealOutcome, new_game};
use rand::prelude::*;

mod view;

#[derive(Parser, Debug)]
#[command(name = "minesweep", version, about = "Terminal minesweeper")]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height in rows
    #[arg(long, default_value_t = 8)]
    rows: u8,

    /// Board width in columns (letter-labeled)
    #[arg(long, default_value_t = 8)]
    cols: u8,

    /// Number of mines
    #[arg(long, default_value_t = 10)]
    mines: u16,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Show digits minus adjacent flags instead of plain mine counts
    #[arg(long)]
    delta: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    if args.cols > 26 {
        bail!("column labels only cover 26 letters, got {} columns", args.cols);
    }

    let config = GameConfig::new((args.rows, args.cols), args.mines);
    let seed = args.seed.unwrap_or_else(seed_from_time);
    let mut rng = SmallRng::seed_from_u64(seed);
    log::debug!("session seed: {seed}");

    println!(
        "Minesweeper {}x{} with {} mines. Type 'h' for help.",
        config.size.0, config.size.1, config.mines
    );

    'game: loop {
        let (mut board, mut state) = start_game(config, &mut rng)?;
        println!("{}", view::render(&board, &state, args.delta));

        while !state.is_terminal() {
            let Some(line) =
                prompt("Enter 'r' to reveal, 'f' to flag or unflag, 'h' for help, 'q' to quit: ")?
            else {
                break 'game;
            };
            let parts: Vec<&str> = line.split_whitespace().collect();
            let Some(&action) = parts.first() else {
                continue;
            };

            match action.to_lowercase().as_str() {
                "q" | "quit" => {
                    if confirm("Are you sure you want to quit? (y/n): ")? {
                        break 'game;
                    }
                }
                "h" | "help" => print_help(),
                "r" | "reveal" => {
                    let Some(coords) = parse_coords(&parts[1..], board.size()) else {
                        println!("Usage: r <column letter><1-based row>, e.g. 'r c5'");
                        continue;
                    };
                    let outcome = reveal_or_chord(&mut board, &mut state, coords)?;
                    log::debug!("reveal at {coords:?}: {outcome:?}");
                    println!("{}", view::render(&board, &state, args.delta));
                }
                "f" | "flag" => {
                    let Some(coords) = parse_coords(&parts[1..], board.size()) else {
                        println!("Usage: f <column letter><1-based row>, e.g. 'f c5'");
                        continue;
                    };
                    let cell = board.cell_at(coords);
                    if cell.is_revealed() {
                        println!("You can't flag a revealed cell");
                    } else if cell.is_flagged() {
                        board.unflag_cell(&state, coords)?;
                    } else {
                        board.flag_cell(&state, coords)?;
                    }
                    println!("{}", view::render(&board, &state, args.delta));
                }
                other => println!("Unknown command '{other}'. Type 'h' for help."),
            }
        }

        if state.has_won {
            println!("You win!");
        } else if state.is_dead {
            println!("You lost :(");
        }

        if !confirm("Play again? (y/n): ")? {
            break;
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

/// Picks a random start position, generates a board with the safety zone
/// around it, and reveals it so the game opens on a cleared region.
fn start_game(config: GameConfig, rng: &mut SmallRng) -> anyhow::Result<(Board, GameState)> {
    let start = (
        rng.random_range(0..config.size.0),
        rng.random_range(0..config.size.1),
    );
    let (mut board, mut state) =
        new_game(config, start, rng.random()).context("the board cannot fit that many mines")?;
    board.reveal_cell(&mut state, start)?;
    Ok((board, state))
}

/// A reveal aimed at an already-revealed cell chords instead: when enough
/// neighbors are flagged, every unflagged neighbor is revealed in one move.
fn reveal_or_chord(
    board: &mut Board,
    state: &mut GameState,
    coords: Coord2,
) -> minesweep_core::Result<RevealOutcome> {
    let cell = board.cell_at(coords);
    if !cell.is_revealed() {
        return board.reveal_cell(state, coords);
    }

    if cell.num_adjacent_flags() < cell.num_adjacent_mines() {
        return Ok(RevealOutcome::NoChange);
    }

    let targets: Vec<Coord2> = board
        .adjacent_cells(coords)
        .filter(|&pos| !board.cell_at(pos).is_flagged())
        .collect();

    let mut outcome = RevealOutcome::NoChange;
    for pos in targets {
        outcome = outcome | board.reveal_cell(state, pos)?;
    }
    Ok(outcome)
}

/// Parses "c5" or "c 5" into 0-indexed (row, col), rejecting anything out of
/// bounds. Rows are entered 1-based, columns as letters.
fn parse_coords(parts: &[&str], (rows, cols): Coord2) -> Option<Coord2> {
    let joined = parts.concat().to_lowercase();
    let mut chars = joined.chars();

    let col_char = chars.next()?;
    if !col_char.is_ascii_lowercase() {
        return None;
    }
    let col = (col_char as u8) - b'a';

    let row: u8 = chars.as_str().parse().ok()?;
    let row = row.checked_sub(1)?;

    (row < rows && col < cols).then_some((row, col))
}

fn print_help() {
    println!(
        "\
Commands:
  r <col><row>  - reveal a cell, e.g. 'r c5'; aiming at a revealed cell
                  whose flag count matches its number reveals all of its
                  unflagged neighbors (a chord)
  f <col><row>  - flag or unflag a cell
  h             - show this help
  q             - quit

Columns are letters (A-Z), rows are numbers starting from 1.
The game ends when you reveal a mine (loss) or every safe cell (win)."
    );
}

fn prompt(text: &str) -> anyhow::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("reading from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn confirm(text: &str) -> anyhow::Result<bool> {
    Ok(prompt(text)?.is_some_and(|line| line.to_lowercase().starts_with('y')))
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_nanos() as u64 ^ (now.as_secs()).rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coords_accepts_joined_and_split_forms() {
        assert_eq!(parse_coords(&["c5"], (8, 8)), Some((4, 2)));
        assert_eq!(parse_coords(&["c", "5"], (8, 8)), Some((4, 2)));
        assert_eq!(parse_coords(&["A1"], (8, 8)), Some((0, 0)));
    }

    #[test]
    fn parse_coords_rejects_bad_input() {
        assert_eq!(parse_coords(&[], (8, 8)), None);
        assert_eq!(parse_coords(&["5c"], (8, 8)), None);
        assert_eq!(parse_coords(&["c"], (8, 8)), None);
        assert_eq!(parse_coords(&["c0"], (8, 8)), None);
        assert_eq!(parse_coords(&["i5"], (8, 8)), None);
        assert_eq!(parse_coords(&["c9"], (8, 8)), None);
    }

    #[test]
    fn chord_with_matching_flags_reveals_unflagged_neighbors() {
        let mut board = Board::from_mine_coords((3, 3), &[(0, 1), (2, 1)]).unwrap();
        let mut state = GameState::default();
        board.reveal_cell(&mut state, (1, 1)).unwrap();
        board.flag_cell(&state, (0, 1)).unwrap();
        board.flag_cell(&state, (2, 1)).unwrap();

        let outcome = reveal_or_chord(&mut board, &mut state, (1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert!(board.cell_at((1, 0)).is_revealed());
        assert!(!board.cell_at((0, 1)).is_revealed());
    }

    #[test]
    fn chord_without_enough_flags_is_a_noop() {
        let mut board = Board::from_mine_coords((3, 3), &[(0, 1), (2, 1)]).unwrap();
        let mut state = GameState::default();
        board.reveal_cell(&mut state, (1, 1)).unwrap();
        board.flag_cell(&state, (0, 1)).unwrap();

        let outcome = reveal_or_chord(&mut board, &mut state, (1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::NoChange);
        assert!(!board.cell_at((1, 0)).is_revealed());
    }
}
