use std::fmt;
use std::str::FromStr;

use crate::constants::BOARD_SIZE;

/// Represents a cell coordinate on the Avalam board.
///
/// Rows and columns are 0-indexed, each in `0..9`, row 0 at the top. The
/// controller sends coordinates as a space-separated pair (`"1 2"`); parsing
/// and display both use that form. A `Position` is always in range, so it
/// can index the board grid directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

/// Error type for coordinate parsing and construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The string was not two whitespace-separated integers
    InvalidFormat(String),
    /// A coordinate fell outside `0..9`
    OutOfRange(i64, i64),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidFormat(s) => {
                write!(f, "invalid coordinate pair '{s}': expected 'row col'")
            }
            PositionError::OutOfRange(row, col) => {
                write!(f, "coordinate ({row}, {col}) is outside the board")
            }
        }
    }
}

impl std::error::Error for PositionError {}

impl Position {
    /// Creates a position from 0-indexed row and column.
    ///
    /// # Returns
    ///
    /// `Some(Position)` when both coordinates are in `0..9`, `None`
    /// otherwise.
    #[inline]
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Returns the 0-indexed row.
    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Returns the 0-indexed column.
    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Iterates over every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| {
            (0..BOARD_SIZE).map(move |col| Position {
                row: row as u8,
                col: col as u8,
            })
        })
    }
}

impl FromStr for Position {
    type Err = PositionError;

    /// Parses the wire form `"row col"`.
    ///
    /// # Returns
    ///
    /// * `Ok(Position)` - Two in-range integers separated by whitespace.
    /// * `Err(PositionError)` - Anything else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let (Some(row), Some(col), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(PositionError::InvalidFormat(s.to_string()));
        };

        let row: i64 = row
            .parse()
            .map_err(|_| PositionError::InvalidFormat(s.to_string()))?;
        let col: i64 = col
            .parse()
            .map_err(|_| PositionError::InvalidFormat(s.to_string()))?;

        if !(0..BOARD_SIZE as i64).contains(&row) || !(0..BOARD_SIZE as i64).contains(&col) {
            return Err(PositionError::OutOfRange(row, col));
        }

        Ok(Position {
            row: row as u8,
            col: col as u8,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}
