//! Generation stepper implementing the three-state transition rule.

use colony_siege_core::{Cell, Coord};

use crate::store::SparseGrid;

/// A single cell transition scheduled for the end-of-generation apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) coord: Coord,
    pub(crate) next: Cell,
}

/// Plans one full generation over the bounding box grown by one ring.
///
/// Every read goes against the generation-start state, so no transition can
/// observe another transition from the same generation. Only cells whose
/// state actually changes are returned.
pub(crate) fn plan_generation(grid: &SparseGrid) -> Vec<Transition> {
    let bounds = grid.bounds();
    let min_x = i64::from(bounds.min_x()) - 1;
    let max_x = i64::from(bounds.max_x()) + 1;
    let min_y = i64::from(bounds.min_y()) - 1;
    let max_y = i64::from(bounds.max_y()) + 1;

    let mut transitions = Vec::new();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (live_neighbors, obstacle_neighbor) = survey_neighbors(grid, x, y);
            let current = grid.cell_at(x, y);

            let alive_next = if current.is_alive() {
                live_neighbors == 2 || live_neighbors == 3
            } else {
                live_neighbors == 3
            };

            let next = if alive_next {
                // Obstacle status dominates: an obstacle stays one, and any
                // live cell touching an obstacle turns into one.
                if current == Cell::Obstacle || obstacle_neighbor {
                    Cell::Obstacle
                } else {
                    Cell::Occupied
                }
            } else {
                Cell::Empty
            };

            if next != current {
                if let Ok(coord) = Coord::try_from_i64(x, y) {
                    transitions.push(Transition { coord, next });
                }
            }
        }
    }
    transitions
}

/// Counts live 8-neighbours and notes whether any of them is an obstacle.
fn survey_neighbors(grid: &SparseGrid, x: i64, y: i64) -> (u8, bool) {
    let mut live = 0u8;
    let mut obstacle = false;
    for y_offset in -1i64..=1 {
        for x_offset in -1i64..=1 {
            if x_offset == 0 && y_offset == 0 {
                continue;
            }
            match grid.cell_at(x + x_offset, y + y_offset) {
                Cell::Empty => {}
                Cell::Obstacle => {
                    live += 1;
                    obstacle = true;
                }
                Cell::Occupied => live += 1,
            }
        }
    }
    (live, obstacle)
}

#[cfg(test)]
mod tests {
    use super::{plan_generation, survey_neighbors};
    use crate::store::SparseGrid;
    use colony_siege_core::{Cell, Coord};

    #[test]
    fn survey_counts_both_live_states() {
        let mut grid = SparseGrid::default();
        grid.set(Coord::new(0, 0), Cell::Occupied);
        grid.set(Coord::new(1, 0), Cell::Obstacle);
        grid.set(Coord::new(0, 1), Cell::Occupied);

        let (live, obstacle) = survey_neighbors(&grid, 1, 1);
        assert_eq!(live, 3);
        assert!(obstacle);

        let (live, obstacle) = survey_neighbors(&grid, -1, 1);
        assert_eq!(live, 2);
        assert!(!obstacle);
    }

    #[test]
    fn empty_board_plans_no_transitions() {
        let grid = SparseGrid::default();
        assert!(plan_generation(&grid).is_empty());
    }

    #[test]
    fn lonely_cell_dies_in_one_generation() {
        let mut grid = SparseGrid::default();
        grid.set(Coord::new(3, 3), Cell::Occupied);

        let transitions = plan_generation(&grid);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].coord, Coord::new(3, 3));
        assert_eq!(transitions[0].next, Cell::Empty);
    }
}
