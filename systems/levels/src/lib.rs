#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level catalogue and loader for Colony Siege.
//!
//! A level arrives as an ASCII seed stencil, plus the centre offset
//! subtracted from every seed, the starting cell budget, the life count,
//! and the capture zones. Loading seeds the board with hostile terrain and
//! hands back a ready session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use colony_siege_board::Board;
use colony_siege_core::{Cell, CellRect, Coord, InvalidCoordinate};
use colony_siege_system_session::{Config, Session, Zone};

/// Declarative level definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    name: String,
    seed_rows: Vec<String>,
    center_x: i64,
    center_y: i64,
    starting_cells: u32,
    lives: u32,
    zones: Vec<Zone>,
}

impl Level {
    /// Creates a new level definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        seed_rows: Vec<String>,
        center: (i64, i64),
        starting_cells: u32,
        lives: u32,
        zones: Vec<Zone>,
    ) -> Self {
        Self {
            name: name.into(),
            seed_rows,
            center_x: center.0,
            center_y: center.1,
            starting_cells,
            lives,
            zones,
        }
    }

    /// Display name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seed stencil rows, top row first.
    #[must_use]
    pub fn seed_rows(&self) -> &[String] {
        &self.seed_rows
    }

    /// Centre offset subtracted from every decoded seed coordinate.
    #[must_use]
    pub const fn center(&self) -> (i64, i64) {
        (self.center_x, self.center_y)
    }

    /// Starting cell budget, which doubles as the per-life recovery refill.
    #[must_use]
    pub const fn starting_cells(&self) -> u32 {
        self.starting_cells
    }

    /// Lives granted at the start of the level.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Capture zones monitored during the level.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }
}

/// Errors surfaced while decoding or loading a level definition.
#[derive(Debug, Error)]
pub enum LevelError {
    /// A stencil row contained a glyph other than `#`, `.` or a space.
    #[error("stencil row {row} contains unsupported glyph '{glyph}'")]
    UnsupportedGlyph {
        /// Zero-based index of the offending row.
        row: usize,
        /// The glyph that could not be interpreted.
        glyph: char,
    },
    /// A recentred seed coordinate left the supported board domain.
    #[error(transparent)]
    Coordinate(#[from] InvalidCoordinate),
}

/// Decodes an ASCII stencil into seed coordinates.
///
/// `#` marks a seed; `.` and spaces are empty padding. The top-left glyph
/// sits at `(0, 0)` with x growing rightwards and y growing downwards.
pub fn decode_stencil(rows: &[String]) -> Result<Vec<(i64, i64)>, LevelError> {
    let mut seeds = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (column_index, glyph) in row.chars().enumerate() {
            match glyph {
                '#' => seeds.push((column_index as i64, row_index as i64)),
                '.' | ' ' => {}
                other => {
                    return Err(LevelError::UnsupportedGlyph {
                        row: row_index,
                        glyph: other,
                    })
                }
            }
        }
    }
    Ok(seeds)
}

/// Builds a ready session from the level definition.
///
/// Every stencil seed is recentred around the level's centre offset,
/// validated against the board's coordinate domain, and placed as hostile
/// terrain before the session wraps the board.
pub fn load(level: &Level) -> Result<Session, LevelError> {
    let seeds = decode_stencil(level.seed_rows())?;
    let (center_x, center_y) = level.center();

    let mut board = Board::new();
    for (x, y) in seeds {
        let coord = Coord::try_from_i64(x - center_x, y - center_y)?;
        board.set(coord, Cell::Obstacle);
    }

    Ok(Session::new(
        board,
        level.zones().to_vec(),
        Config::new(level.starting_cells(), level.lives()),
    ))
}

/// Built-in level catalogue, easiest first.
#[must_use]
pub fn builtin_levels() -> Vec<Level> {
    vec![
        Level::new(
            "first bloom",
            rows(&[
                "...........",
                "...........",
                "....##.....",
                "....##.....",
                "...........",
                "...........",
                "...........",
                ".....###...",
                "...........",
                "...........",
                "...........",
            ]),
            (5, 5),
            6,
            3,
            vec![Zone::new(
                CellRect::spanning(Coord::new(-5, -5), Coord::new(-2, -2)),
                3,
            )],
        ),
        Level::new(
            "overgrowth",
            rows(&[
                "...............",
                ".##............",
                ".##............",
                "...............",
                "......###......",
                "...............",
                "...........##..",
                "..........#..#.",
                "...........##..",
                "...............",
                "....###........",
                "...............",
                "...............",
            ]),
            (7, 6),
            14,
            5,
            vec![Zone::new(
                CellRect::spanning(Coord::new(4, -4), Coord::new(8, 0)),
                5,
            )],
        ),
    ]
}

fn rows(stencil: &[&str]) -> Vec<String> {
    stencil.iter().map(|row| (*row).to_string()).collect()
}
