use std::fmt;

/// Represents one of the two players.
///
/// The controller identifies players by the sign of an integer field:
/// positive for Player 1, negative for Player 2. That encoding stays at the
/// wire boundary; everywhere else a `Player` value is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the sign this player carries on the wire.
    ///
    /// # Returns
    ///
    /// * `1` for `Player::One`
    /// * `-1` for `Player::Two`
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Decodes a signed wire field into a player.
    ///
    /// # Returns
    ///
    /// `Some(Player::One)` for positive values, `Some(Player::Two)` for
    /// negative values, `None` for zero.
    #[inline]
    pub fn from_sign(value: i32) -> Option<Player> {
        match value {
            v if v > 0 => Some(Player::One),
            v if v < 0 => Some(Player::Two),
            _ => None,
        }
    }

    /// Returns the 1-based player number used in status text.
    #[inline]
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Returns the 0-based index used for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }

    #[test]
    fn test_sign_round_trip() {
        for player in [Player::One, Player::Two] {
            assert_eq!(Player::from_sign(player.sign()), Some(player));
        }
    }

    #[test]
    fn test_from_sign_magnitude_is_ignored() {
        assert_eq!(Player::from_sign(3), Some(Player::One));
        assert_eq!(Player::from_sign(-5), Some(Player::Two));
    }

    #[test]
    fn test_from_sign_zero() {
        assert_eq!(Player::from_sign(0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::One.to_string(), "Player 1");
        assert_eq!(Player::Two.to_string(), "Player 2");
    }

    #[test]
    fn test_indices() {
        assert_eq!(Player::One.index(), 0);
        assert_eq!(Player::Two.index(), 1);
        assert_eq!(Player::One.number(), 1);
        assert_eq!(Player::Two.number(), 2);
    }
}
