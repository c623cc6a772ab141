//! Sparse cell storage and incremental bounding-box maintenance.

use std::collections::HashMap;

use metrohash::MetroBuildHasher;

use colony_siege_core::{Cell, CellRect, Coord};

/// Sparse mapping from packed coordinates to live cells, plus the running
/// bounding box.
///
/// The box is conservative by construction: insertions grow it
/// unconditionally, while clearing an edge cell shrinks the affected edge by
/// at most one step per call. It therefore always contains every live cell
/// but only becomes tight again as boundary cells are cleared one at a time.
/// The box starts as the degenerate rectangle at the origin and keeps the
/// origin inside it for the lifetime of the store.
#[derive(Debug, Default)]
pub(crate) struct SparseGrid {
    cells: HashMap<u64, Cell, MetroBuildHasher>,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl SparseGrid {
    /// Returns the state stored at `coord`, [`Cell::Empty`] when absent.
    pub(crate) fn get(&self, coord: Coord) -> Cell {
        self.cells.get(&coord.key()).copied().unwrap_or(Cell::Empty)
    }

    /// Reads a cell addressed with wide integers, treating anything outside
    /// the supported domain as empty. Out-of-domain coordinates cannot hold
    /// state, so the stepper may scan past the domain edge safely.
    pub(crate) fn cell_at(&self, x: i64, y: i64) -> Cell {
        match Coord::try_from_i64(x, y) {
            Ok(coord) => self.get(coord),
            Err(_) => Cell::Empty,
        }
    }

    /// Writes `state` at `coord` and maintains the bounding box.
    pub(crate) fn set(&mut self, coord: Coord, state: Cell) {
        if state.is_alive() {
            self.min_x = self.min_x.min(coord.x());
            self.max_x = self.max_x.max(coord.x());
            self.min_y = self.min_y.min(coord.y());
            self.max_y = self.max_y.max(coord.y());
            let _ = self.cells.insert(coord.key(), state);
        } else {
            // The shrink check must observe the store as it was before the
            // removal; the scans below exclude the cleared cell themselves.
            self.shrink_for_clear(coord);
            let _ = self.cells.remove(&coord.key());
        }
    }

    /// Single-step edge shrink run when a cell is cleared.
    ///
    /// Interior clears never move the box. Edge clears retract an edge by
    /// exactly one unit, and only when the cleared cell was the last live
    /// one in its edge column or row. Repeated clears converge toward a
    /// tight box one step at a time.
    fn shrink_for_clear(&mut self, coord: Coord) {
        let (x, y) = (coord.x(), coord.y());

        if x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y {
            return;
        }

        // Shrinking a degenerate axis would invert the box.
        if self.min_x == self.max_x || self.min_y == self.max_y {
            return;
        }

        if x == self.min_x || x == self.max_x {
            let column_occupied = (self.min_y..=self.max_y)
                .any(|check_y| check_y != y && self.get(Coord::new(x, check_y)).is_alive());
            if !column_occupied {
                if x == self.min_x {
                    self.min_x += 1;
                } else {
                    self.max_x -= 1;
                }
            }
        }

        if y == self.min_y || y == self.max_y {
            let row_occupied = (self.min_x..=self.max_x)
                .any(|check_x| check_x != x && self.get(Coord::new(check_x, y)).is_alive());
            if !row_occupied {
                if y == self.min_y {
                    self.min_y += 1;
                } else {
                    self.max_y -= 1;
                }
            }
        }
    }

    /// Bounding box guaranteed to contain every live cell.
    pub(crate) fn bounds(&self) -> CellRect {
        CellRect::spanning(
            Coord::new(self.min_x, self.min_y),
            Coord::new(self.max_x, self.max_y),
        )
    }

    /// Number of live cells currently stored.
    pub(crate) fn population(&self) -> usize {
        self.cells.len()
    }

    /// Iterates every live cell in store order.
    pub(crate) fn live_cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .map(|(key, cell)| (Coord::from_key(*key), *cell))
    }
}
