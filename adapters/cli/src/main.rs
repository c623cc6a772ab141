#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Colony Siege levels headlessly.

mod snapshot_transfer;

use anyhow::{bail, Context};
use clap::Parser;

use colony_siege_board::Board;
use colony_siege_core::{Cell, Coord};
use colony_siege_system_levels::{builtin_levels, load};
use snapshot_transfer::BoardSnapshot;

/// Command-line arguments accepted by the runner.
#[derive(Debug, Parser)]
#[command(name = "colony-siege", about = "Headless runner for Colony Siege levels")]
struct Args {
    /// Zero-based index into the built-in level catalogue.
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Number of generations to simulate after the placements.
    #[arg(long, default_value_t = 16)]
    generations: u32,

    /// Colony cells to place before the run, formatted as `x,y`.
    #[arg(long = "place", value_name = "X,Y")]
    placements: Vec<String>,

    /// Print the shareable snapshot string after the run.
    #[arg(long)]
    snapshot: bool,

    /// Render a previously exported snapshot instead of running a level.
    #[arg(long, value_name = "SNAPSHOT")]
    inspect: Option<String>,

    /// Suppress the board render.
    #[arg(long)]
    quiet: bool,
}

/// Entry point for the Colony Siege command-line interface.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(encoded) = &args.inspect {
        let snapshot =
            BoardSnapshot::decode(encoded).context("could not decode the provided snapshot")?;
        print!("{}", render_board(&snapshot.into_board()));
        return Ok(());
    }

    let catalogue = builtin_levels();
    let level = catalogue
        .get(args.level)
        .with_context(|| format!("no built-in level with index {}", args.level))?;
    let mut session =
        load(level).with_context(|| format!("could not load level '{}'", level.name()))?;

    for raw in &args.placements {
        let coord = parse_placement(raw)?;
        if !session.place_cell(coord) {
            bail!("placement {raw} refused: the budget is exhausted or the game is over");
        }
    }

    let summary = session.advance(args.generations);

    if !args.quiet {
        print!("{}", render_board(session.board()));
    }

    println!(
        "level '{}': {} of {} generations applied{}",
        level.name(),
        summary.generations_applied,
        args.generations,
        if summary.interrupted {
            ", interrupted"
        } else {
            ""
        }
    );
    if session.is_won() {
        println!("outcome: zone captured, level won");
    } else if session.game_over() {
        println!("outcome: no lives left");
    } else {
        println!(
            "outcome: in progress with {} lives and {} cells in the budget",
            session.lives(),
            session.available_cells()
        );
    }

    if args.snapshot {
        println!("{}", BoardSnapshot::capture(session.board()).encode());
    }

    Ok(())
}

/// Parses a `x,y` placement argument into a validated board coordinate.
fn parse_placement(raw: &str) -> anyhow::Result<Coord> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("placement '{raw}' is not of the form x,y"))?;
    let x: i64 = x
        .trim()
        .parse()
        .with_context(|| format!("invalid x component in placement '{raw}'"))?;
    let y: i64 = y
        .trim()
        .parse()
        .with_context(|| format!("invalid y component in placement '{raw}'"))?;
    Ok(Coord::try_from_i64(x, y)?)
}

/// Draws the bounding box of the board with one glyph per cell.
fn render_board(board: &Board) -> String {
    let bounds = board.bounds();
    let mut out = String::new();
    for y in bounds.min_y()..=bounds.max_y() {
        for x in bounds.min_x()..=bounds.max_x() {
            out.push(match board.get(Coord::new(x, y)) {
                Cell::Empty => '.',
                Cell::Obstacle => '#',
                Cell::Occupied => 'o',
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{parse_placement, render_board};
    use colony_siege_board::Board;
    use colony_siege_core::{Cell, Coord};

    #[test]
    fn placements_parse_signed_components() {
        let coord = parse_placement("-3, 7").expect("placement parses");
        assert_eq!(coord, Coord::new(-3, 7));
        assert!(parse_placement("nonsense").is_err());
    }

    #[test]
    fn render_uses_one_glyph_per_state() {
        let mut board = Board::new();
        board.set(Coord::new(1, 0), Cell::Obstacle);
        board.set(Coord::new(0, 1), Cell::Occupied);

        assert_eq!(render_board(&board), ".#\no.\n");
    }
}
