//! Mirror of the server-authoritative Avalam board.

use std::fmt;

use crate::constants::{BOARD_SIZE, MAX_TOWER_HEIGHT};
use crate::player::Player;
use crate::position::Position;
use crate::tower::Tower;

/// Starting layout. The sign picks the owner, zero marks cells outside the
/// playable shape; every tower starts at height 1.
#[rustfmt::skip]
const INITIAL_LAYOUT: [[i8; BOARD_SIZE]; BOARD_SIZE] = [
    [ 0,  0,  1, -1,  0,  0,  0,  0,  0],
    [ 0,  1, -1,  1, -1,  0,  0,  0,  0],
    [ 0, -1,  1, -1,  1, -1,  1,  0,  0],
    [ 0,  1, -1,  1, -1,  1, -1,  1, -1],
    [ 1, -1,  1, -1,  0, -1,  1, -1,  1],
    [-1,  1, -1,  1, -1,  1, -1,  1,  0],
    [ 0,  0,  1, -1,  1, -1,  1, -1,  0],
    [ 0,  0,  0,  0, -1,  1, -1,  1,  0],
    [ 0,  0,  0,  0,  0, -1,  1,  0,  0],
];

/// Error type for broadcast mutations the mirror refuses to apply.
///
/// The client never checks adjacency or turn order (the controller owns the
/// rules); it only rejects mutations that would corrupt the mirror itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The cell holds no tower
    NotAStack(Position),
    /// The cell is outside the playable shape
    NoTile(Position),
    /// The merged height would exceed the maximum
    TooTall(u8),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::NotAStack(pos) => write!(f, "no tower at ({pos})"),
            BoardError::NoTile(pos) => write!(f, "no tile at ({pos})"),
            BoardError::TooTall(height) => {
                write!(f, "merged height {height} exceeds {MAX_TOWER_HEIGHT}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The 9x9 board: a fixed grid of towers indexed by [`Position`].
///
/// State is only ever mutated by server broadcasts (`merge` for a forward
/// move, `split` for an undo); user moves wait for the controller's
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Tower; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    /// Creates a board with the standard Avalam starting position:
    /// 48 height-1 towers, 24 per player, corners and center unplayable.
    fn default() -> Self {
        Self::from_signed_grid(INITIAL_LAYOUT)
    }
}

impl Board {
    /// Creates a new `Board` with the initial Avalam setup.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a `Board` from a signed grid.
    ///
    /// Positive and negative values become towers (sign = owner, magnitude =
    /// height). Zero keeps the cell's initial-layout character: `NoTile`
    /// where the playable shape has no cell, `Empty` elsewhere. This is how
    /// test positions and snapshots are written down.
    pub fn from_signed_grid(grid: [[i8; BOARD_SIZE]; BOARD_SIZE]) -> Board {
        let mut cells = [[Tower::NoTile; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in grid.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                cells[row][col] = match Tower::from_signed(value as i32) {
                    Ok(tower) => tower,
                    Err(_) if INITIAL_LAYOUT[row][col] == 0 => Tower::NoTile,
                    Err(_) => Tower::Empty,
                };
            }
        }
        Board { cells }
    }

    /// Returns the signed grid form of the board (see `from_signed_grid`).
    pub fn to_signed_grid(&self) -> [[i8; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[0i8; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all() {
            grid[pos.row()][pos.col()] = self.tower(pos).to_signed() as i8;
        }
        grid
    }

    /// Returns the tower at a position.
    #[inline]
    pub fn tower(&self, pos: Position) -> Tower {
        self.cells[pos.row()][pos.col()]
    }

    /// Applies a server-confirmed forward move: the tower at `from` is
    /// stacked onto the tower at `to`, heights merge, `from` empties.
    ///
    /// # Returns
    ///
    /// * `Ok(player)` - The absorbed owner (`to`'s owner before the merge),
    ///   whose score loses a point.
    /// * `Err(BoardError)` - Either cell held no tower, or the merged height
    ///   would exceed the maximum. The board is left untouched.
    pub fn merge(&mut self, from: Position, to: Position) -> Result<Player, BoardError> {
        let Tower::Stack { owner, height } = self.tower(from) else {
            return Err(BoardError::NotAStack(from));
        };
        let Tower::Stack {
            owner: absorbed,
            height: to_height,
        } = self.tower(to)
        else {
            return Err(BoardError::NotAStack(to));
        };

        let merged = height + to_height;
        if merged > MAX_TOWER_HEIGHT {
            return Err(BoardError::TooTall(merged));
        }

        self.cells[to.row()][to.col()] = Tower::Stack {
            owner,
            height: merged,
        };
        self.cells[from.row()][from.col()] = Tower::Empty;
        Ok(absorbed)
    }

    /// Applies a server-confirmed undo: both cells are restored to their
    /// pre-merge towers.
    ///
    /// # Returns
    ///
    /// * `Ok(player)` - The restored owner of `to` (the formerly absorbed
    ///   player), whose score regains a point.
    /// * `Err(BoardError)` - A target cell is unplayable or a former tower
    ///   is not a stack. The board is left untouched.
    pub fn split(
        &mut self,
        from: Position,
        to: Position,
        former_from: Tower,
        former_to: Tower,
    ) -> Result<Player, BoardError> {
        if !self.tower(from).is_playable() {
            return Err(BoardError::NoTile(from));
        }
        if !self.tower(to).is_playable() {
            return Err(BoardError::NoTile(to));
        }
        if !former_from.is_stack() {
            return Err(BoardError::NotAStack(from));
        }
        let Tower::Stack { owner: restored, .. } = former_to else {
            return Err(BoardError::NotAStack(to));
        };

        self.cells[from.row()][from.col()] = former_from;
        self.cells[to.row()][to.col()] = former_to;
        Ok(restored)
    }

    /// Counts towers of maximum height owned by `player` (the score
    /// tiebreak: a full tower can never be covered again).
    pub fn full_towers(&self, player: Player) -> u32 {
        self.towers()
            .filter(|(_, tower)| {
                tower.owner() == Some(player) && tower.height() == MAX_TOWER_HEIGHT
            })
            .count() as u32
    }

    /// Iterates over every playable cell and its tower, row-major.
    pub fn towers(&self) -> impl Iterator<Item = (Position, Tower)> + '_ {
        Position::all()
            .map(|pos| (pos, self.tower(pos)))
            .filter(|(_, tower)| tower.is_playable())
    }
}

impl fmt::Display for Board {
    /// Renders the signed grid, `.` for emptied sockets and blanks for
    /// cells outside the shape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                match self.cells[row][col] {
                    Tower::NoTile => write!(f, "   ")?,
                    Tower::Empty => write!(f, "  .")?,
                    tower => write!(f, "{:+3}", tower.to_signed())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
