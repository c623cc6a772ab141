#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use colony_siege_board::{query, Board};
use colony_siege_core::{Cell, Coord};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "colony";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "colony:v1";
/// Delimiter used to separate the prefix, board dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of every live cell on a board plus its bounding-box dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct BoardSnapshot {
    /// Number of columns covered by the bounding box.
    pub(crate) width: u64,
    /// Number of rows covered by the bounding box.
    pub(crate) height: u64,
    /// Live cells captured in deterministic coordinate order.
    pub(crate) cells: Vec<SnapshotCell>,
}

impl BoardSnapshot {
    /// Captures the live cells and bounding box of the provided board.
    #[must_use]
    pub(crate) fn capture(board: &Board) -> Self {
        let bounds = board.bounds();
        let cells = query::live_cells(board)
            .into_iter()
            .map(|(coord, state)| SnapshotCell {
                x: coord.x(),
                y: coord.y(),
                state,
            })
            .collect();
        Self {
            width: bounds.width(),
            height: bounds.height(),
            cells,
        }
    }

    /// Rebuilds a board holding exactly the snapshot's live cells.
    #[must_use]
    pub(crate) fn into_board(self) -> Board {
        let mut board = Board::new();
        for cell in self.cells {
            board.set(Coord::new(cell.x, cell.y), cell.state);
        }
        board
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            cells: self.cells.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("board snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.width, self.height)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, SnapshotTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SnapshotTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SnapshotTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(SnapshotTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(SnapshotTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(SnapshotTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(SnapshotTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(SnapshotTransferError::UnsupportedVersion(
                version.to_owned(),
            ));
        }

        let (width, height) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(SnapshotTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(SnapshotTransferError::InvalidPayload)?;

        Ok(Self {
            width,
            height,
            cells: decoded.cells,
        })
    }
}

/// Live cell captured within a board snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SnapshotCell {
    /// Horizontal coordinate of the cell.
    pub(crate) x: i32,
    /// Vertical coordinate of the cell.
    pub(crate) y: i32,
    /// State stored at the coordinate.
    pub(crate) state: Cell,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    cells: Vec<SnapshotCell>,
}

/// Errors that can occur while decoding snapshot transfer strings.
#[derive(Debug)]
pub(crate) enum SnapshotTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include board dimensions.
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The board dimensions could not be parsed from the encoded snapshot.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for SnapshotTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "snapshot payload was empty"),
            Self::MissingPrefix => write!(f, "snapshot string is missing the prefix"),
            Self::MissingVersion => write!(f, "snapshot string is missing the version"),
            Self::MissingDimensions => write!(f, "snapshot string is missing the board dimensions"),
            Self::MissingPayload => write!(f, "snapshot string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "snapshot prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "snapshot version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse board dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode snapshot payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse snapshot payload: {error}")
            }
        }
    }
}

impl Error for SnapshotTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u64, u64), SnapshotTransferError> {
    let (width, height) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let width = width
        .trim()
        .parse::<u64>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let height = height
        .trim()
        .parse::<u64>()
        .map_err(|_| SnapshotTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if width == 0 || height == 0 {
        return Err(SnapshotTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_siege_board::Board;
    use colony_siege_core::{Cell, Coord};

    #[test]
    fn round_trip_empty_board() {
        let snapshot = BoardSnapshot::capture(&Board::new());
        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:1x1:")));

        let decoded = BoardSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
        assert!(decoded.cells.is_empty());
    }

    #[test]
    fn round_trip_populated_board() {
        let mut board = Board::new();
        board.set(Coord::new(-2, 1), Cell::Obstacle);
        board.set(Coord::new(3, 4), Cell::Occupied);

        let snapshot = BoardSnapshot::capture(&board);
        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:6x5:")));

        let decoded = BoardSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);

        let rebuilt = decoded.into_board();
        assert_eq!(rebuilt.get(Coord::new(-2, 1)), Cell::Obstacle);
        assert_eq!(rebuilt.get(Coord::new(3, 4)), Cell::Occupied);
    }

    #[test]
    fn decode_rejects_foreign_prefixes() {
        let error =
            BoardSnapshot::decode("garden:v1:3x3:e30").expect_err("prefix must be rejected");
        assert!(matches!(error, SnapshotTransferError::InvalidPrefix(_)));
    }

    #[test]
    fn decode_rejects_malformed_dimensions() {
        let error =
            BoardSnapshot::decode("colony:v1:3by3:e30").expect_err("dimensions must be rejected");
        assert!(matches!(error, SnapshotTransferError::InvalidDimensions(_)));
    }

    #[test]
    fn decode_rejects_empty_input() {
        let error = BoardSnapshot::decode("   ").expect_err("blank input must be rejected");
        assert!(matches!(error, SnapshotTransferError::EmptyPayload));
    }
}
