#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative sparse board for the Colony Siege automaton.
//!
//! The board owns the sparse cell store with its conservative bounding box,
//! steps the three-state transition rule one atomic generation at a time,
//! and carries the cooperative interruption protocol: an installable halt
//! predicate consulted after every applied generation, plus an observer
//! registry notified on direct mutations and at the end of every tick.
//!
//! Everything here is single-threaded and synchronous. Callbacks run inline
//! on the caller's stack and must not re-enter the board; panics raised
//! inside them propagate to the caller untouched.

use std::fmt;

use colony_siege_core::{BoardUpdate, Cell, CellRect, Coord, ObserverId, TickSummary};

mod stepper;
mod store;

use store::SparseGrid;

/// Read-only view of the board handed to the halt predicate.
#[derive(Clone, Copy)]
pub struct BoardView<'a> {
    grid: &'a SparseGrid,
}

impl BoardView<'_> {
    /// Returns the state stored at `coord`, [`Cell::Empty`] when absent.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.grid.get(coord)
    }

    /// Bounding box guaranteed to contain every live cell.
    #[must_use]
    pub fn bounds(&self) -> CellRect {
        self.grid.bounds()
    }

    /// Number of live cells currently stored.
    #[must_use]
    pub fn population(&self) -> usize {
        self.grid.population()
    }
}

impl fmt::Debug for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardView")
            .field("bounds", &self.bounds())
            .field("population", &self.population())
            .finish()
    }
}

type HaltPredicate = Box<dyn FnMut(&BoardView<'_>) -> bool>;
type Observer = Box<dyn FnMut(&BoardUpdate)>;

/// Authoritative board: sparse store, bounding box, halt predicate, and
/// observer registry.
///
/// Created once per level with an empty store and the bounding box seeded to
/// the degenerate rectangle at the origin; mutated through [`Board::set`]
/// and [`Board::tick`] for the rest of its life.
#[derive(Default)]
pub struct Board {
    grid: SparseGrid,
    halt: Option<HaltPredicate>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state stored at `coord`, [`Cell::Empty`] when absent.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Cell {
        self.grid.get(coord)
    }

    /// Writes `state` at `coord` and maintains the bounding box.
    ///
    /// Live states grow the box unconditionally; clearing runs the
    /// conservative single-step edge shrink before the entry disappears.
    /// Every call fires [`BoardUpdate::Mutation`] at the registered
    /// observers. Tick-internal writes go through the deferred path instead
    /// and surface as a single end-of-tick notification.
    pub fn set(&mut self, coord: Coord, state: Cell) {
        self.grid.set(coord, state);
        self.notify(&BoardUpdate::Mutation);
    }

    /// Advances the automaton by up to `generations` generations.
    ///
    /// Each generation scans the bounding box grown by one ring, plans every
    /// transition against the generation-start state, and applies the plan
    /// atomically. After each applied generation the installed halt
    /// predicate is consulted; a `true` verdict stops the tick and marks it
    /// interrupted. Exactly one [`BoardUpdate::TickCompleted`] notification
    /// fires at the end, including for `generations == 0`.
    pub fn tick(&mut self, generations: u32) -> TickSummary {
        let mut generations_applied = 0;
        let mut interrupted = false;

        for _ in 0..generations {
            let transitions = stepper::plan_generation(&self.grid);
            for transition in &transitions {
                self.grid.set(transition.coord, transition.next);
            }
            generations_applied += 1;

            if self.consult_halt() {
                interrupted = true;
                break;
            }
        }

        self.notify(&BoardUpdate::TickCompleted { interrupted });
        TickSummary {
            generations_applied,
            interrupted,
        }
    }

    /// Bounding box guaranteed to contain every live cell.
    ///
    /// The box is conservative: always valid, tight only eventually as edge
    /// cells are cleared one at a time.
    #[must_use]
    pub fn bounds(&self) -> CellRect {
        self.grid.bounds()
    }

    /// Smallest x any live cell can occupy.
    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.bounds().min_x()
    }

    /// Largest x any live cell can occupy.
    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.bounds().max_x()
    }

    /// Smallest y any live cell can occupy.
    #[must_use]
    pub fn min_y(&self) -> i32 {
        self.bounds().min_y()
    }

    /// Largest y any live cell can occupy.
    #[must_use]
    pub fn max_y(&self) -> i32 {
        self.bounds().max_y()
    }

    /// Installs the halt predicate consulted after every applied generation.
    ///
    /// Only one predicate is active at a time; installing another replaces
    /// the previous one (last write wins). Before any installation the board
    /// never halts.
    pub fn install_halt_predicate<F>(&mut self, predicate: F)
    where
        F: FnMut(&BoardView<'_>) -> bool + 'static,
    {
        self.halt = Some(Box::new(predicate));
    }

    /// Registers an observer and returns the handle that identifies this
    /// registration.
    ///
    /// Each registration is a distinct identity, so the same closure can
    /// never be double-registered under one handle.
    pub fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&BoardUpdate) + 'static,
    {
        let id = ObserverId::new(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Deregisters the observer behind `id`.
    ///
    /// Removing an unknown or already-removed handle is a no-op that returns
    /// `false`.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        match self
            .observers
            .iter()
            .position(|(observer_id, _)| *observer_id == id)
        {
            Some(index) => {
                let _ = self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    fn consult_halt(&mut self) -> bool {
        let view = BoardView { grid: &self.grid };
        match self.halt.as_mut() {
            Some(predicate) => predicate(&view),
            None => false,
        }
    }

    fn notify(&mut self, update: &BoardUpdate) {
        for (_, observer) in self.observers.iter_mut() {
            observer(update);
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("bounds", &self.grid.bounds())
            .field("population", &self.grid.population())
            .field("halt_installed", &self.halt.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use super::{Board, BoardView};
    use colony_siege_core::{Cell, Coord};

    /// Number of live cells currently stored.
    #[must_use]
    pub fn population(board: &Board) -> usize {
        board.grid.population()
    }

    /// Captures every live cell sorted by coordinate for deterministic
    /// consumption.
    #[must_use]
    pub fn live_cells(board: &Board) -> Vec<(Coord, Cell)> {
        let mut cells: Vec<(Coord, Cell)> = board.grid.live_cells().collect();
        cells.sort_by_key(|(coord, _)| *coord);
        cells
    }

    /// Borrows the read-only view also handed to the halt predicate.
    #[must_use]
    pub fn view(board: &Board) -> BoardView<'_> {
        BoardView { grid: &board.grid }
    }
}
