//! Wire protocol with the Avalam game controller.
//!
//! Frames are UTF-8 text; lines are separated by `\n` and the first line is
//! the message tag. Coordinates travel as space-separated pairs. A signed
//! integer field encodes a player in its sign (positive Player 1, negative
//! Player 2); tower fields carry the owner the same way with the height as
//! magnitude. Step fields follow the controller's numbering: move broadcasts
//! carry zero-based move indices, legal-move announcements one-based turn
//! numbers.

use std::fmt;

use crate::mode::GameMode;
use crate::player::Player;
use crate::position::Position;
use crate::tower::Tower;

const CONFIG_TAG: &str = "CONFIG";
const PLAY_TAG: &str = "PLAY";
const PREVIOUS_TAG: &str = "PREVIOUS";
const FINISHED_TAG: &str = "FINISHED";
const ACTIONS_TAG: &str = "ACTIONS";

const READY_TAG: &str = "READY";
const ACKNOWLEDGEMENT_TAG: &str = "ACKNOWLEDGEMENT";
const PAUSE_TAG: &str = "PAUSE";
const NEXT_TAG: &str = "NEXT";
const MOVE_TAG: &str = "MOVE";

/// Represents one inbound frame from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// CONFIG: the interaction mode for this session.
    Config(GameMode),
    /// PLAY: a confirmed forward move, optionally carrying finish text.
    Play {
        mover: Player,
        step: u32,
        from: Position,
        to: Position,
        finish: Vec<String>,
    },
    /// PREVIOUS: an undo broadcast with both pre-merge towers.
    Previous {
        mover: Player,
        step: u32,
        from: Position,
        to: Position,
        former_from: Tower,
        former_to: Tower,
    },
    /// FINISHED: the result text, displayed verbatim.
    Finished(Vec<String>),
    /// ACTIONS: the complete legal-move set for one turn.
    Actions {
        to_move: Player,
        step: u32,
        moves: Vec<(Position, Position)>,
    },
}

/// Represents one outbound frame to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// READY: accept a config, echoing the mode name.
    Ready(GameMode),
    /// ACKNOWLEDGEMENT: a forward move was processed.
    Acknowledgement,
    /// PAUSE: halt replay playback.
    Pause,
    /// PLAY: resume replay playback.
    Resume,
    /// NEXT: step forward while paused.
    Next,
    /// PREVIOUS: step backward while paused.
    Previous,
    /// MOVE: commit the selected move.
    Move { from: Position, to: Position },
}

/// Error type for inbound frames the parser rejects.
///
/// A rejected frame is dropped without any state change; the controller is
/// never answered with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame contained nothing but whitespace
    EmptyFrame,
    /// The tag is not in the inbound set
    UnknownTag(String),
    /// The mode name is not one of the five known modes
    UnknownMode(String),
    /// A required payload line was missing
    MissingField(&'static str),
    /// A payload field failed to parse
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::EmptyFrame => write!(f, "empty frame"),
            ProtocolError::UnknownTag(tag) => write!(f, "unknown message tag '{tag}'"),
            ProtocolError::UnknownMode(name) => write!(f, "unknown game mode '{name}'"),
            ProtocolError::MissingField(name) => write!(f, "missing field '{name}'"),
            ProtocolError::InvalidField { field, value } => {
                write!(f, "invalid {field} '{value}'")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl ServerMessage {
    /// Parses one inbound frame.
    ///
    /// The frame is trimmed as a whole before splitting, so trailing
    /// newlines and carriage returns do not matter.
    ///
    /// # Arguments
    ///
    /// * `frame` - The complete text of one message.
    ///
    /// # Returns
    ///
    /// * `Ok(ServerMessage)` - The typed message.
    /// * `Err(ProtocolError)` - The frame must be dropped.
    pub fn parse(frame: &str) -> Result<ServerMessage, ProtocolError> {
        let frame = frame.trim();
        if frame.is_empty() {
            return Err(ProtocolError::EmptyFrame);
        }

        let lines: Vec<&str> = frame.split('\n').collect();
        let Some((&tag, payload)) = lines.split_first() else {
            return Err(ProtocolError::EmptyFrame);
        };

        match tag.trim() {
            CONFIG_TAG => {
                let name = field(payload, 0, "mode")?.trim();
                let mode = GameMode::from_wire(name)
                    .ok_or_else(|| ProtocolError::UnknownMode(name.to_string()))?;
                Ok(ServerMessage::Config(mode))
            }
            PLAY_TAG => {
                let mover = parse_player(field(payload, 0, "player sign")?)?;
                let step = parse_step(field(payload, 1, "step")?)?;
                let from = parse_position(field(payload, 2, "from")?, "from")?;
                let to = parse_position(field(payload, 3, "to")?, "to")?;
                let finish = payload
                    .iter()
                    .skip(4)
                    .map(|line| line.trim_end().to_string())
                    .collect();
                Ok(ServerMessage::Play {
                    mover,
                    step,
                    from,
                    to,
                    finish,
                })
            }
            PREVIOUS_TAG => {
                let mover = parse_player(field(payload, 0, "player sign")?)?;
                let step = parse_step(field(payload, 1, "step")?)?;
                let from = parse_position(field(payload, 2, "from")?, "from")?;
                let to = parse_position(field(payload, 3, "to")?, "to")?;
                let (former_from, former_to) =
                    parse_former_towers(field(payload, 4, "former heights")?)?;
                Ok(ServerMessage::Previous {
                    mover,
                    step,
                    from,
                    to,
                    former_from,
                    former_to,
                })
            }
            FINISHED_TAG => Ok(ServerMessage::Finished(
                payload.iter().map(|line| line.trim_end().to_string()).collect(),
            )),
            ACTIONS_TAG => {
                let to_move = parse_player(field(payload, 0, "player sign")?)?;
                let step = parse_step(field(payload, 1, "step")?)?;
                let moves = payload
                    .iter()
                    .skip(2)
                    .map(|line| parse_move_line(line))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ServerMessage::Actions {
                    to_move,
                    step,
                    moves,
                })
            }
            other => Err(ProtocolError::UnknownTag(other.to_string())),
        }
    }
}

impl ClientMessage {
    /// Serializes the message to its exact frame bytes.
    ///
    /// READY and MOVE carry their payload on the following lines without a
    /// trailing newline; the single-tag messages end with one. This matches
    /// the controller's parser byte for byte.
    pub fn encode(&self) -> String {
        match self {
            ClientMessage::Ready(mode) => format!("{READY_TAG}\n{}", mode.wire_name()),
            ClientMessage::Acknowledgement => format!("{ACKNOWLEDGEMENT_TAG}\n"),
            ClientMessage::Pause => format!("{PAUSE_TAG}\n"),
            ClientMessage::Resume => format!("{PLAY_TAG}\n"),
            ClientMessage::Next => format!("{NEXT_TAG}\n"),
            ClientMessage::Previous => format!("{PREVIOUS_TAG}\n"),
            ClientMessage::Move { from, to } => format!(
                "{MOVE_TAG}\n{}\n{}\n{}\n{}",
                from.row(),
                from.col(),
                to.row(),
                to.col()
            ),
        }
    }
}

fn field<'a>(payload: &[&'a str], index: usize, name: &'static str) -> Result<&'a str, ProtocolError> {
    payload
        .get(index)
        .copied()
        .ok_or(ProtocolError::MissingField(name))
}

fn invalid(field: &'static str, value: &str) -> ProtocolError {
    ProtocolError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_player(text: &str) -> Result<Player, ProtocolError> {
    let value: i32 = text
        .trim()
        .parse()
        .map_err(|_| invalid("player sign", text))?;
    Player::from_sign(value).ok_or_else(|| invalid("player sign", text))
}

fn parse_step(text: &str) -> Result<u32, ProtocolError> {
    text.trim().parse().map_err(|_| invalid("step", text))
}

fn parse_position(text: &str, name: &'static str) -> Result<Position, ProtocolError> {
    text.parse().map_err(|_| invalid(name, text))
}

/// Parses one `"fromRow fromCol toRow toCol"` announcement line.
fn parse_move_line(text: &str) -> Result<(Position, Position), ProtocolError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(invalid("move", text));
    }

    let mut coords = [0usize; 4];
    for (slot, raw) in coords.iter_mut().zip(&fields) {
        *slot = raw.parse().map_err(|_| invalid("move", text))?;
    }

    let from = Position::new(coords[0], coords[1]).ok_or_else(|| invalid("move", text))?;
    let to = Position::new(coords[2], coords[3]).ok_or_else(|| invalid("move", text))?;
    Ok((from, to))
}

/// Parses the `"signedFrom signedTo"` pre-merge tower pair of an undo.
fn parse_former_towers(text: &str) -> Result<(Tower, Tower), ProtocolError> {
    const NAME: &str = "former heights";
    let mut parts = text.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid(NAME, text));
    };

    let decode = |raw: &str| -> Result<Tower, ProtocolError> {
        let value: i32 = raw.parse().map_err(|_| invalid(NAME, text))?;
        Tower::from_signed(value).map_err(|_| invalid(NAME, text))
    };

    Ok((decode(from)?, decode(to)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_parse_config() {
        assert_eq!(
            ServerMessage::parse("CONFIG\nreplay"),
            Ok(ServerMessage::Config(GameMode::Replay))
        );
        assert_eq!(
            ServerMessage::parse("CONFIG\nai vs ai"),
            Ok(ServerMessage::Config(GameMode::AiVsAi))
        );
    }

    #[test]
    fn test_parse_config_unknown_mode() {
        assert_eq!(
            ServerMessage::parse("CONFIG\nspectate"),
            Err(ProtocolError::UnknownMode("spectate".to_string()))
        );
    }

    #[test]
    fn test_parse_config_missing_mode() {
        assert_eq!(
            ServerMessage::parse("CONFIG"),
            Err(ProtocolError::MissingField("mode"))
        );
    }

    #[test]
    fn test_parse_play() {
        assert_eq!(
            ServerMessage::parse("PLAY\n1\n5\n1 2\n2 2"),
            Ok(ServerMessage::Play {
                mover: Player::One,
                step: 5,
                from: pos(1, 2),
                to: pos(2, 2),
                finish: vec![],
            })
        );
    }

    #[test]
    fn test_parse_play_with_finish_lines() {
        assert_eq!(
            ServerMessage::parse("PLAY\n1\n5\n1 2\n2 2\nStep 6: Game Over\nPlayer 1 wins"),
            Ok(ServerMessage::Play {
                mover: Player::One,
                step: 5,
                from: pos(1, 2),
                to: pos(2, 2),
                finish: vec!["Step 6: Game Over".to_string(), "Player 1 wins".to_string()],
            })
        );
    }

    #[test]
    fn test_parse_play_zero_sign() {
        assert!(matches!(
            ServerMessage::parse("PLAY\n0\n5\n1 2\n2 2"),
            Err(ProtocolError::InvalidField { field: "player sign", .. })
        ));
    }

    #[test]
    fn test_parse_play_truncated() {
        assert_eq!(
            ServerMessage::parse("PLAY\n1\n5\n1 2"),
            Err(ProtocolError::MissingField("to"))
        );
    }

    #[test]
    fn test_parse_play_bad_coordinate() {
        assert!(matches!(
            ServerMessage::parse("PLAY\n1\n5\n1 9\n2 2"),
            Err(ProtocolError::InvalidField { field: "from", .. })
        ));
    }

    #[test]
    fn test_parse_previous() {
        assert_eq!(
            ServerMessage::parse("PREVIOUS\n-1\n4\n1 2\n2 2\n-1 2"),
            Ok(ServerMessage::Previous {
                mover: Player::Two,
                step: 4,
                from: pos(1, 2),
                to: pos(2, 2),
                former_from: Tower::Stack {
                    owner: Player::Two,
                    height: 1
                },
                former_to: Tower::Stack {
                    owner: Player::One,
                    height: 2
                },
            })
        );
    }

    #[test]
    fn test_parse_previous_bad_former_towers() {
        assert!(matches!(
            ServerMessage::parse("PREVIOUS\n-1\n4\n1 2\n2 2\n0 2"),
            Err(ProtocolError::InvalidField { field: "former heights", .. })
        ));
        assert!(matches!(
            ServerMessage::parse("PREVIOUS\n-1\n4\n1 2\n2 2\n6 2"),
            Err(ProtocolError::InvalidField { field: "former heights", .. })
        ));
        assert!(matches!(
            ServerMessage::parse("PREVIOUS\n-1\n4\n1 2\n2 2\n3"),
            Err(ProtocolError::InvalidField { field: "former heights", .. })
        ));
    }

    #[test]
    fn test_parse_finished() {
        assert_eq!(
            ServerMessage::parse("FINISHED\nStep 37: Game Over\nPlayer 2 wins"),
            Ok(ServerMessage::Finished(vec![
                "Step 37: Game Over".to_string(),
                "Player 2 wins".to_string(),
            ]))
        );
        assert_eq!(
            ServerMessage::parse("FINISHED"),
            Ok(ServerMessage::Finished(vec![]))
        );
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            ServerMessage::parse("ACTIONS\n-1\n3\n1 2 2 2\n1 2 2 3"),
            Ok(ServerMessage::Actions {
                to_move: Player::Two,
                step: 3,
                moves: vec![(pos(1, 2), pos(2, 2)), (pos(1, 2), pos(2, 3))],
            })
        );
    }

    #[test]
    fn test_parse_actions_empty_move_list() {
        assert_eq!(
            ServerMessage::parse("ACTIONS\n1\n7"),
            Ok(ServerMessage::Actions {
                to_move: Player::One,
                step: 7,
                moves: vec![],
            })
        );
    }

    #[test]
    fn test_parse_actions_bad_move_line() {
        assert!(matches!(
            ServerMessage::parse("ACTIONS\n1\n7\n1 2 2"),
            Err(ProtocolError::InvalidField { field: "move", .. })
        ));
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            ServerMessage::parse("HELLO\nworld"),
            Err(ProtocolError::UnknownTag("HELLO".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_frame() {
        assert_eq!(ServerMessage::parse(""), Err(ProtocolError::EmptyFrame));
        assert_eq!(ServerMessage::parse("  \n "), Err(ProtocolError::EmptyFrame));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(
            ServerMessage::parse("\nPLAY\n1\n5\n1 2\n2 2\n"),
            Ok(ServerMessage::Play {
                mover: Player::One,
                step: 5,
                from: pos(1, 2),
                to: pos(2, 2),
                finish: vec![],
            })
        );
    }

    #[test]
    fn test_encode_ready() {
        assert_eq!(
            ClientMessage::Ready(GameMode::Replay).encode(),
            "READY\nreplay"
        );
        assert_eq!(
            ClientMessage::Ready(GameMode::HumanVsAi).encode(),
            "READY\nhuman vs ai"
        );
    }

    #[test]
    fn test_encode_single_tag_messages() {
        assert_eq!(ClientMessage::Acknowledgement.encode(), "ACKNOWLEDGEMENT\n");
        assert_eq!(ClientMessage::Pause.encode(), "PAUSE\n");
        assert_eq!(ClientMessage::Resume.encode(), "PLAY\n");
        assert_eq!(ClientMessage::Next.encode(), "NEXT\n");
        assert_eq!(ClientMessage::Previous.encode(), "PREVIOUS\n");
    }

    #[test]
    fn test_encode_move() {
        let message = ClientMessage::Move {
            from: pos(1, 2),
            to: pos(2, 2),
        };
        assert_eq!(message.encode(), "MOVE\n1\n2\n2\n2");
    }
}
