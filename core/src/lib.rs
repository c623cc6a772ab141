#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Colony Siege engine.
//!
//! This crate defines the vocabulary that connects the authoritative board,
//! the gameplay systems, and the adapters: the three cell states, signed
//! board coordinates together with their packed sparse-store key, inclusive
//! rectangles used for both the bounding box and capture zones, and the
//! notification values delivered to board observers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a single board coordinate.
///
/// The sparse store only materialises live cells; absence always reads as
/// [`Cell::Empty`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No live cell at this coordinate.
    #[default]
    Empty,
    /// Hostile terrain cell. Obstacle status is contagious: a cell that is
    /// born or survives next to an obstacle becomes an obstacle itself.
    Obstacle,
    /// Player-controlled colony cell.
    Occupied,
}

impl Cell {
    /// Reports whether the cell counts as alive for neighbour counting.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        !matches!(self, Self::Empty)
    }
}

/// Location of a single cell on the signed 32-bit board plane.
///
/// The supported coordinate domain is exactly the range of `i32`; inputs
/// arriving from outside that domain must pass through
/// [`Coord::try_from_i64`], which rejects them instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    /// Creates a new coordinate from in-domain components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Validates a coordinate pair arriving from outside the supported
    /// domain, rejecting anything beyond the signed 32-bit plane.
    pub fn try_from_i64(x: i64, y: i64) -> Result<Self, InvalidCoordinate> {
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self::new(x, y)),
            _ => Err(InvalidCoordinate { x, y }),
        }
    }

    /// Packs both components into the sparse-store key: the high 32 bits hold
    /// `x`, the low 32 bits hold `y`, each as its two's-complement pattern.
    #[must_use]
    pub const fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    /// Recovers the coordinate packed by [`Coord::key`].
    #[must_use]
    pub const fn from_key(key: u64) -> Self {
        Self {
            x: (key >> 32) as u32 as i32,
            y: key as u32 as i32,
        }
    }
}

/// Axis-aligned rectangle with inclusive edges on all four sides.
///
/// Serves both as the board's bounding box and as capture-zone geometry.
/// The invariant `min_x <= max_x && min_y <= max_y` holds for every value
/// constructible through this API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl CellRect {
    /// Creates the degenerate rectangle covering a single coordinate.
    #[must_use]
    pub const fn point(coord: Coord) -> Self {
        Self {
            min_x: coord.x(),
            max_x: coord.x(),
            min_y: coord.y(),
            max_y: coord.y(),
        }
    }

    /// Creates the smallest rectangle containing both corners, normalising
    /// their order per axis.
    #[must_use]
    pub const fn spanning(a: Coord, b: Coord) -> Self {
        let (min_x, max_x) = if a.x() <= b.x() {
            (a.x(), b.x())
        } else {
            (b.x(), a.x())
        };
        let (min_y, max_y) = if a.y() <= b.y() {
            (a.y(), b.y())
        } else {
            (b.y(), a.y())
        };
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Smallest x covered by the rectangle.
    #[must_use]
    pub const fn min_x(&self) -> i32 {
        self.min_x
    }

    /// Largest x covered by the rectangle.
    #[must_use]
    pub const fn max_x(&self) -> i32 {
        self.max_x
    }

    /// Smallest y covered by the rectangle.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Largest y covered by the rectangle.
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Reports whether the coordinate lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x() >= self.min_x
            && coord.x() <= self.max_x
            && coord.y() >= self.min_y
            && coord.y() <= self.max_y
    }

    /// Number of columns covered by the rectangle.
    #[must_use]
    pub const fn width(&self) -> u64 {
        (self.max_x as i64 - self.min_x as i64 + 1) as u64
    }

    /// Number of rows covered by the rectangle.
    #[must_use]
    pub const fn height(&self) -> u64 {
        (self.max_y as i64 - self.min_y as i64 + 1) as u64
    }

    /// Returns the rectangle grown by `margin` cells on every side,
    /// saturating at the edges of the coordinate domain.
    #[must_use]
    pub const fn grown(&self, margin: i32) -> Self {
        Self {
            min_x: self.min_x.saturating_sub(margin),
            max_x: self.max_x.saturating_add(margin),
            min_y: self.min_y.saturating_sub(margin),
            max_y: self.max_y.saturating_add(margin),
        }
    }

    /// Iterates every coordinate in the rectangle in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (min_x, max_x) = (self.min_x, self.max_x);
        (self.min_y..=self.max_y).flat_map(move |y| (min_x..=max_x).map(move |x| Coord::new(x, y)))
    }
}

/// Notification delivered to registered board observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardUpdate {
    /// A cell changed through a direct `set` outside of any tick.
    Mutation,
    /// A tick finished, either by exhausting its generation budget or by
    /// being halted early through the installed predicate.
    TickCompleted {
        /// True when the halt predicate requested early termination.
        interrupted: bool,
    },
}

/// Handle identifying a single observer registration.
///
/// Boxed callbacks carry no usable identity of their own, so every
/// registration mints a fresh handle and removal takes it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Creates a new observer handle with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Outcome of a completed tick call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSummary {
    /// Number of generations that were actually applied.
    pub generations_applied: u32,
    /// True when the halt predicate cut the tick short.
    pub interrupted: bool,
}

/// Error raised when a coordinate pair lies outside the supported signed
/// 32-bit board domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("coordinate ({x}, {y}) is outside the supported signed 32-bit board domain")]
pub struct InvalidCoordinate {
    /// Horizontal component of the rejected pair.
    pub x: i64,
    /// Vertical component of the rejected pair.
    pub y: i64,
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellRect, Coord};

    #[test]
    fn key_packs_negative_components_reversibly() {
        for coord in [
            Coord::new(0, 0),
            Coord::new(-1, 1),
            Coord::new(1, -1),
            Coord::new(i32::MIN, i32::MAX),
            Coord::new(-12_345, 67_890),
        ] {
            assert_eq!(
                Coord::from_key(coord.key()),
                coord,
                "key round trip diverged for {coord:?}"
            );
        }
    }

    #[test]
    fn keys_keep_distinct_coordinates_distinct() {
        assert_ne!(Coord::new(-1, 0).key(), Coord::new(0, -1).key());
        assert_ne!(Coord::new(1, 0).key(), Coord::new(0, 1).key());
    }

    #[test]
    fn try_from_i64_rejects_out_of_domain_pairs() {
        assert!(Coord::try_from_i64(i64::from(i32::MAX) + 1, 0).is_err());
        assert!(Coord::try_from_i64(0, i64::from(i32::MIN) - 1).is_err());
        assert_eq!(
            Coord::try_from_i64(-5, 7).expect("in-domain pair"),
            Coord::new(-5, 7)
        );
    }

    #[test]
    fn spanning_normalises_corner_order() {
        let rect = CellRect::spanning(Coord::new(3, -2), Coord::new(-1, 4));
        assert_eq!(rect.min_x(), -1);
        assert_eq!(rect.max_x(), 3);
        assert_eq!(rect.min_y(), -2);
        assert_eq!(rect.max_y(), 4);
        assert_eq!(rect.width(), 5);
        assert_eq!(rect.height(), 7);
    }

    #[test]
    fn grown_saturates_at_the_domain_edge() {
        let rect = CellRect::spanning(Coord::new(i32::MIN + 1, 0), Coord::new(i32::MAX, 0)).grown(2);
        assert_eq!(rect.min_x(), i32::MIN);
        assert_eq!(rect.max_x(), i32::MAX);
    }

    #[test]
    fn contains_treats_edges_as_inclusive() {
        let rect = CellRect::spanning(Coord::new(-2, -2), Coord::new(2, 2));
        assert!(rect.contains(Coord::new(-2, 2)));
        assert!(rect.contains(Coord::new(2, -2)));
        assert!(!rect.contains(Coord::new(3, 0)));
    }

    #[test]
    fn absent_cells_default_to_empty() {
        assert_eq!(Cell::default(), Cell::Empty);
        assert!(!Cell::Empty.is_alive());
        assert!(Cell::Obstacle.is_alive());
        assert!(Cell::Occupied.is_alive());
    }
}
