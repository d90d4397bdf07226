//! Global constants

/// Rows and columns of the Avalam board.
pub const BOARD_SIZE: usize = 9;

/// Maximum height of a tower; a full tower can no longer be covered.
pub const MAX_TOWER_HEIGHT: u8 = 5;

/// Towers each player owns when the game starts.
pub const INITIAL_SCORE: u32 = 24;

/// Combined tower count at the start of the game.
pub const INITIAL_TOWERS: u32 = 2 * INITIAL_SCORE;
