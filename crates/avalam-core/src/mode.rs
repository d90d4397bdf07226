use std::fmt;

/// Represents the interaction mode announced by the controller's CONFIG.
///
/// The first four modes differ only on the controller side (who supplies
/// each player's moves); the client reacts identically to all of them. In
/// `Replay` a stored game is stepped through with the playback controls
/// instead of live input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsAi,
    AiVsHuman,
    AiVsAi,
    Replay,
}

impl GameMode {
    /// All modes, in declaration order.
    pub fn all() -> [GameMode; 5] {
        [
            GameMode::HumanVsHuman,
            GameMode::HumanVsAi,
            GameMode::AiVsHuman,
            GameMode::AiVsAi,
            GameMode::Replay,
        ]
    }

    /// Returns the exact mode string used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            GameMode::HumanVsHuman => "human vs human",
            GameMode::HumanVsAi => "human vs ai",
            GameMode::AiVsHuman => "ai vs human",
            GameMode::AiVsAi => "ai vs ai",
            GameMode::Replay => "replay",
        }
    }

    /// Parses a CONFIG mode string.
    ///
    /// # Returns
    ///
    /// `None` when the name is not one of the five known modes.
    pub fn from_wire(name: &str) -> Option<GameMode> {
        GameMode::all()
            .into_iter()
            .find(|mode| mode.wire_name() == name)
    }

    /// Whether this is the stored-game playback mode.
    #[inline]
    pub fn is_replay(self) -> bool {
        matches!(self, GameMode::Replay)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
