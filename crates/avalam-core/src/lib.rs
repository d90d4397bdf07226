pub mod board;
pub mod constants;
pub mod mode;
pub mod moves;
pub mod player;
pub mod position;
pub mod protocol;
pub mod session;
pub mod tower;
