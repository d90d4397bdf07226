use std::fmt;

use crate::constants::MAX_TOWER_HEIGHT;
use crate::player::Player;

/// Represents the contents of one board cell.
///
/// * `NoTile` - Outside the playable board shape for the whole game.
/// * `Empty` - A socket whose tower was merged away (height 0).
/// * `Stack` - A tower topped by `owner`, `1..=5` tiles tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tower {
    NoTile,
    Empty,
    Stack { owner: Player, height: u8 },
}

/// Error type for the signed wire encoding of a tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowerError {
    /// Zero encodes the absence of a tower
    NotATower,
    /// The magnitude exceeded the maximum tower height
    TooTall(i32),
}

impl fmt::Display for TowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TowerError::NotATower => write!(f, "zero does not encode a tower"),
            TowerError::TooTall(value) => {
                write!(f, "tower encoding {value} exceeds height {MAX_TOWER_HEIGHT}")
            }
        }
    }
}

impl std::error::Error for TowerError {}

impl Tower {
    /// Decodes the signed wire form: the sign picks the owner (positive
    /// Player 1, negative Player 2), the magnitude is the height.
    ///
    /// # Returns
    ///
    /// * `Ok(Tower::Stack { .. })` for values in `-5..=-1` and `1..=5`.
    /// * `Err(TowerError)` for zero or an over-tall magnitude.
    pub fn from_signed(value: i32) -> Result<Tower, TowerError> {
        let Some(owner) = Player::from_sign(value) else {
            return Err(TowerError::NotATower);
        };
        let height = value.unsigned_abs();
        if height > MAX_TOWER_HEIGHT as u32 {
            return Err(TowerError::TooTall(value));
        }
        Ok(Tower::Stack {
            owner,
            height: height as u8,
        })
    }

    /// Returns the signed form: `sign(owner) * height`, zero for cells
    /// holding no tower.
    #[inline]
    pub fn to_signed(self) -> i32 {
        match self {
            Tower::Stack { owner, height } => owner.sign() * height as i32,
            _ => 0,
        }
    }

    /// Returns the owner of the top tile, if any.
    #[inline]
    pub fn owner(self) -> Option<Player> {
        match self {
            Tower::Stack { owner, .. } => Some(owner),
            _ => None,
        }
    }

    /// Returns the tower height, 0 for `Empty` and `NoTile`.
    #[inline]
    pub fn height(self) -> u8 {
        match self {
            Tower::Stack { height, .. } => height,
            _ => 0,
        }
    }

    /// Whether the cell holds a tower.
    #[inline]
    pub fn is_stack(self) -> bool {
        matches!(self, Tower::Stack { .. })
    }

    /// Whether the cell belongs to the playable shape.
    #[inline]
    pub fn is_playable(self) -> bool {
        !matches!(self, Tower::NoTile)
    }
}
