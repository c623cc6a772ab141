#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session for Colony Siege: lives, the spendable cell budget, capture
//! zones, and the win/loss evaluator wired into the board's halt predicate.
//!
//! The session consumes only the board's public boundary: cell reads, the
//! bounding box, direct placement, and predicate installation. It never
//! reaches into the automaton itself, so the board stays ignorant of
//! players, lives, and zones.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use colony_siege_board::{Board, BoardView};
use colony_siege_core::{Cell, CellRect, Coord, TickSummary};

/// Rectangular capture zone with its occupation threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    rect: CellRect,
    required_occupied: u32,
}

impl Zone {
    /// Creates a new capture zone over the provided rectangle.
    #[must_use]
    pub const fn new(rect: CellRect, required_occupied: u32) -> Self {
        Self {
            rect,
            required_occupied,
        }
    }

    /// Rectangle monitored by the zone.
    #[must_use]
    pub const fn rect(&self) -> CellRect {
        self.rect
    }

    /// Number of colony cells required to capture the zone.
    #[must_use]
    pub const fn required_occupied(&self) -> u32 {
        self.required_occupied
    }

    /// Counts the colony cells currently inside the zone.
    #[must_use]
    pub fn occupied_count(&self, view: &BoardView<'_>) -> u32 {
        let count = self
            .rect
            .coords()
            .filter(|coord| view.cell(*coord) == Cell::Occupied)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Reports whether the zone currently meets its capture threshold.
    #[must_use]
    pub fn is_captured(&self, view: &BoardView<'_>) -> bool {
        self.occupied_count(view) >= self.required_occupied
    }
}

/// Starting resources handed to a new session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    starting_cells: u32,
    lives: u32,
}

impl Config {
    /// Creates a new configuration with the provided budget and lives.
    ///
    /// `starting_cells` doubles as the per-life recovery refill.
    #[must_use]
    pub const fn new(starting_cells: u32, lives: u32) -> Self {
        Self {
            starting_cells,
            lives,
        }
    }
}

#[derive(Debug)]
struct Progress {
    lives: u32,
    available_cells: u32,
    recovery_cells: u32,
    won: bool,
}

/// Owns the board plus campaign progress, and keeps the capture evaluator
/// installed as the board's halt predicate.
#[derive(Debug)]
pub struct Session {
    board: Board,
    zones: Vec<Zone>,
    progress: Rc<RefCell<Progress>>,
}

impl Session {
    /// Wraps the provided board into a session and installs the win/loss
    /// evaluator as its halt predicate.
    #[must_use]
    pub fn new(mut board: Board, zones: Vec<Zone>, config: Config) -> Self {
        let progress = Rc::new(RefCell::new(Progress {
            lives: config.lives,
            available_cells: config.starting_cells,
            recovery_cells: config.starting_cells,
            won: false,
        }));

        let predicate_zones = zones.clone();
        let predicate_progress = Rc::clone(&progress);
        board.install_halt_predicate(move |view| {
            evaluate(view, &predicate_zones, &mut predicate_progress.borrow_mut())
        });

        Self {
            board,
            zones,
            progress,
        }
    }

    /// Spends one budget cell to toggle the state at `coord`.
    ///
    /// Placing on an empty coordinate births a colony cell; placing on any
    /// live cell clears it. Refused without spending once the budget is
    /// exhausted or the game is over.
    pub fn place_cell(&mut self, coord: Coord) -> bool {
        {
            let mut progress = self.progress.borrow_mut();
            if progress.available_cells == 0 || progress.lives == 0 || progress.won {
                return false;
            }
            progress.available_cells -= 1;
        }

        let next = match self.board.get(coord) {
            Cell::Empty => Cell::Occupied,
            Cell::Obstacle | Cell::Occupied => Cell::Empty,
        };
        self.board.set(coord, next);
        true
    }

    /// Advances the simulation, stopping early when the evaluator interrupts.
    pub fn advance(&mut self, generations: u32) -> TickSummary {
        self.board.tick(generations)
    }

    /// Lives the player has left.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.progress.borrow().lives
    }

    /// Budget cells still available for placement.
    #[must_use]
    pub fn available_cells(&self) -> u32 {
        self.progress.borrow().available_cells
    }

    /// Reports whether a zone capture has won the session.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.progress.borrow().won
    }

    /// Reports whether the session has ended, by victory or exhaustion.
    #[must_use]
    pub fn game_over(&self) -> bool {
        let progress = self.progress.borrow();
        progress.lives == 0 || progress.won
    }

    /// Zones monitored by the capture evaluator.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Read-only access to the underlying board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access to the underlying board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

/// Win/loss evaluation run after every applied generation.
///
/// Requests an interruption either when a zone reaches its capture threshold
/// (the session is won) or when the colony is extinct with no budget left
/// (a life is spent and the budget refills).
fn evaluate(view: &BoardView<'_>, zones: &[Zone], progress: &mut Progress) -> bool {
    if zones.iter().any(|zone| zone.is_captured(view)) {
        progress.won = true;
        return true;
    }

    let colony_alive = view
        .bounds()
        .coords()
        .any(|coord| view.cell(coord) == Cell::Occupied);
    if !colony_alive && progress.available_cells == 0 {
        progress.lives = progress.lives.saturating_sub(1);
        progress.available_cells = progress.recovery_cells;
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::{Config, Zone};
    use colony_siege_core::{CellRect, Coord};

    #[test]
    fn config_reuses_the_budget_as_recovery() {
        let config = Config::new(7, 2);
        assert_eq!(config.starting_cells, 7);
        assert_eq!(config.lives, 2);
    }

    #[test]
    fn zone_accessors_expose_the_construction_values() {
        let rect = CellRect::spanning(Coord::new(-1, -1), Coord::new(2, 3));
        let zone = Zone::new(rect, 4);
        assert_eq!(zone.rect(), rect);
        assert_eq!(zone.required_occupied(), 4);
    }
}
