//! The session state machine.
//!
//! One [`Session`] mirrors everything the controller broadcasts (board,
//! scores, turn, step) and layers the purely local interaction state on
//! top: the selected tower, the legal-move index and the playback controls.
//! Inbound messages go through [`Session::handle_message`]; user intent goes
//! through the `*_clicked` handlers. Both return the outbound message the
//! protocol mandates, if any; the caller owns the transport.

use crate::board::{Board, BoardError};
use crate::constants::INITIAL_SCORE;
use crate::mode::GameMode;
use crate::moves::MoveIndex;
use crate::player::Player;
use crate::position::Position;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::tower::Tower;

const SELECT_PROMPT: &str = "Click on a tower to select it.";
const STACK_PROMPT: &str = "Click on a tower to stack on.";

/// Represents the lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Connected, waiting for the controller's CONFIG.
    AwaitingConfig,
    /// Broadcasts are being mirrored; human turns accept move input.
    InProgress,
    /// The result is shown; only history review remains. An undo broadcast
    /// leaves this phase again.
    Finished,
}

/// Playback control state for replay mode.
///
/// Outside replay the controls stay hidden; enabled flags are only
/// meaningful while `visible` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub visible: bool,
    /// Auto-advancing (`true`) or halted by the user (`false`).
    pub playing: bool,
    pub play_pause_enabled: bool,
    pub next_enabled: bool,
    pub previous_enabled: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Playback {
            visible: false,
            playing: true,
            play_pause_enabled: false,
            next_enabled: false,
            previous_enabled: false,
        }
    }
}

/// The two status lines shown under the board.
///
/// The primary line tracks the step and turn; the secondary line carries the
/// selection prompt, or the second line of the result text once finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLines {
    pub primary: String,
    pub secondary: String,
}

/// Outcome of the live score comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player(Player),
    Draw,
}

/// Represents one game session mirrored from the controller.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Option<GameMode>,
    phase: Phase,
    board: Board,
    scores: [u32; 2],
    current_player: Player,
    step: u32,
    selected: Option<Position>,
    moves: MoveIndex,
    playback: Playback,
    status: StatusLines,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a fresh session: initial board, 24 points each, step 1,
    /// Player 1 to move, no config yet.
    pub fn new() -> Session {
        Session {
            mode: None,
            phase: Phase::AwaitingConfig,
            board: Board::new(),
            scores: [INITIAL_SCORE; 2],
            current_player: Player::One,
            step: 1,
            selected: None,
            moves: MoveIndex::new(),
            playback: Playback::default(),
            status: StatusLines::default(),
        }
    }

    /// Returns the configured mode, if a CONFIG arrived yet.
    #[inline]
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Returns the lifecycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the board mirror.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns a player's score (towers currently topped by them).
    #[inline]
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    /// Returns the player whose turn the status line shows.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the displayed step number.
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Returns the currently selected tower, if any.
    #[inline]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Returns the legal-move index for the current turn.
    #[inline]
    pub fn moves(&self) -> &MoveIndex {
        &self.moves
    }

    /// Returns the playback control state.
    #[inline]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Returns the status lines.
    #[inline]
    pub fn status(&self) -> &StatusLines {
        &self.status
    }

    /// Compares the live scores for the HUD.
    ///
    /// Higher score leads; a tie falls to the difference in full (height 5)
    /// towers, which can never be covered again. This is display only; the
    /// final result always comes from the controller's FINISHED text.
    pub fn live_winner(&self) -> Winner {
        let one = self.score(Player::One);
        let two = self.score(Player::Two);
        if one != two {
            return Winner::Player(if one > two { Player::One } else { Player::Two });
        }

        let delta = self.board.full_towers(Player::One) as i32
            - self.board.full_towers(Player::Two) as i32;
        match delta {
            d if d > 0 => Winner::Player(Player::One),
            d if d < 0 => Winner::Player(Player::Two),
            _ => Winner::Draw,
        }
    }

    /// Applies one inbound message and returns the reply it mandates.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(reply))` - CONFIG is answered with READY, a forward move
    ///   with ACKNOWLEDGEMENT.
    /// * `Ok(None)` - The message needs no reply.
    /// * `Err(BoardError)` - The board mirror rejected the mutation; the
    ///   frame is dropped whole with no state change and no reply.
    pub fn handle_message(
        &mut self,
        message: ServerMessage,
    ) -> Result<Option<ClientMessage>, BoardError> {
        match message {
            ServerMessage::Config(mode) => Ok(Some(self.apply_config(mode))),
            ServerMessage::Play {
                mover,
                step,
                from,
                to,
                finish,
            } => {
                self.apply_forward_move(mover, step, from, to, &finish)?;
                Ok(Some(ClientMessage::Acknowledgement))
            }
            ServerMessage::Previous {
                mover,
                step,
                from,
                to,
                former_from,
                former_to,
            } => {
                self.apply_undo_move(mover, step, from, to, former_from, former_to)?;
                Ok(None)
            }
            ServerMessage::Finished(lines) => {
                self.finish(&lines);
                Ok(None)
            }
            ServerMessage::Actions {
                to_move,
                step,
                moves,
            } => {
                self.announce_moves(to_move, step, &moves);
                Ok(None)
            }
        }
    }

    /// Applies a CONFIG: records the mode and sets up the controls.
    ///
    /// Replay shows the playback controls with play/pause enabled and the
    /// step controls disabled; every other mode hides them and the client
    /// stays purely reactive. The returned READY echoes the mode name.
    pub fn apply_config(&mut self, mode: GameMode) -> ClientMessage {
        self.mode = Some(mode);
        self.phase = Phase::InProgress;
        if mode.is_replay() {
            self.playback.visible = true;
            self.playback.play_pause_enabled = true;
            self.playback.next_enabled = false;
            self.playback.previous_enabled = false;
            self.status.primary = format!("Step 1: {}'s turn", Player::One);
            self.status.secondary.clear();
        } else {
            self.playback.visible = false;
            self.playback.play_pause_enabled = false;
            self.playback.next_enabled = false;
            self.playback.previous_enabled = false;
        }
        ClientMessage::Ready(mode)
    }

    /// Applies a confirmed forward move broadcast.
    ///
    /// The merge happens on the board mirror, the absorbed owner loses a
    /// point, the turn passes to the mover's opponent and the displayed step
    /// becomes `step + 2` (broadcast steps are zero-based move indices).
    /// Trailing finish lines chain straight into [`Session::finish`].
    pub fn apply_forward_move(
        &mut self,
        mover: Player,
        step: u32,
        from: Position,
        to: Position,
        finish: &[String],
    ) -> Result<(), BoardError> {
        let absorbed = self.board.merge(from, to)?;
        self.scores[absorbed.index()] -= 1;
        self.current_player = mover.opponent();
        self.step = step + 2;
        if !self.playback.playing {
            self.playback.previous_enabled = true;
        }
        self.status.primary = format!("Step {}: {}'s turn", self.step, self.current_player);
        self.status.secondary.clear();
        if !finish.is_empty() {
            self.finish(finish);
        }
        Ok(())
    }

    /// Applies an undo broadcast: the exact inverse of a forward move.
    ///
    /// Both cells are restored from the signed pre-merge towers, the
    /// formerly absorbed owner regains their point, the turn returns to the
    /// mover and the displayed step becomes `step + 1`. Play/pause and next
    /// become usable again; at step 1 there is nothing further back, so
    /// previous is disabled.
    pub fn apply_undo_move(
        &mut self,
        mover: Player,
        step: u32,
        from: Position,
        to: Position,
        former_from: Tower,
        former_to: Tower,
    ) -> Result<(), BoardError> {
        let restored = self.board.split(from, to, former_from, former_to)?;
        self.scores[restored.index()] += 1;
        self.current_player = mover;
        self.step = step + 1;
        if self.step == 1 {
            self.playback.previous_enabled = false;
        }
        self.playback.play_pause_enabled = true;
        self.playback.next_enabled = true;
        self.phase = Phase::InProgress;
        self.status.primary = format!("Step {}: {}'s turn", self.step, self.current_player);
        self.status.secondary.clear();
        Ok(())
    }

    /// Applies a legal-move announcement for one turn.
    ///
    /// The index is replaced wholesale: a fresh ACTIONS is one turn's
    /// complete move set, so nothing from a prior turn may leak. Any stale
    /// selection is dropped with it.
    pub fn announce_moves(&mut self, to_move: Player, step: u32, moves: &[(Position, Position)]) {
        self.current_player = to_move;
        self.step = step;
        self.moves.replace(moves.iter().copied());
        self.selected = None;
        self.status.primary = format!("Step {step}: {to_move}'s turn");
        self.status.secondary = SELECT_PROMPT.to_string();
    }

    /// Enters the finished phase and shows the result text verbatim.
    ///
    /// Move input is over: the index and selection are cleared, playback
    /// halts with only previous enabled, and the controls are shown so the
    /// game can be reviewed backwards.
    pub fn finish(&mut self, lines: &[String]) {
        self.phase = Phase::Finished;
        self.selected = None;
        self.moves.clear();
        if let Some(first) = lines.first() {
            self.status.primary = first.clone();
        }
        if let Some(second) = lines.get(1) {
            self.status.secondary = second.clone();
        }
        self.playback.visible = true;
        self.playback.next_enabled = false;
        self.playback.play_pause_enabled = false;
        self.playback.playing = false;
        self.playback.previous_enabled = true;
    }

    /// Routes a click on a board cell through select, deselect or confirm.
    ///
    /// Clicking an announced source selects it; clicking the selection again
    /// deselects; clicking one of the selection's destinations commits the
    /// move. Everything else is a silent no-op.
    pub fn tower_clicked(&mut self, pos: Position) -> Option<ClientMessage> {
        if self.selected.is_none() {
            self.select_tower(pos);
            None
        } else if self.selected == Some(pos) {
            self.deselect_tower(pos);
            None
        } else {
            self.confirm_move(pos)
        }
    }

    /// Selects an announced source. Ignored when something is already
    /// selected or `pos` has no announced moves.
    pub fn select_tower(&mut self, pos: Position) {
        if self.selected.is_none() && self.moves.contains_source(pos) {
            self.selected = Some(pos);
            self.status.secondary = STACK_PROMPT.to_string();
        }
    }

    /// Clears the selection. Ignored unless `pos` is the selected tile.
    pub fn deselect_tower(&mut self, pos: Position) {
        if self.selected == Some(pos) {
            self.selected = None;
            self.status.secondary = SELECT_PROMPT.to_string();
        }
    }

    /// Commits the selected move if `pos` is one of its announced
    /// destinations.
    ///
    /// Clears the index and the selection and returns the MOVE to send. The
    /// board is deliberately left untouched; the mirror only changes on the
    /// controller's confirming broadcast.
    pub fn confirm_move(&mut self, pos: Position) -> Option<ClientMessage> {
        let from = self.selected?;
        if !self.moves.is_move(from, pos) {
            return None;
        }
        self.moves.clear();
        self.selected = None;
        Some(ClientMessage::Move { from, to: pos })
    }

    /// Toggles replay playback when the control is enabled.
    ///
    /// Pausing sends PAUSE and reveals the step controls (previous only
    /// past step 1); resuming sends PLAY and hides them again.
    pub fn play_pause_clicked(&mut self) -> Option<ClientMessage> {
        if !self.playback.play_pause_enabled {
            return None;
        }

        let reply = if self.playback.playing {
            if self.step > 1 {
                self.playback.previous_enabled = true;
            }
            self.playback.next_enabled = true;
            ClientMessage::Pause
        } else {
            self.playback.previous_enabled = false;
            self.playback.next_enabled = false;
            ClientMessage::Resume
        };
        self.playback.playing = !self.playback.playing;
        Some(reply)
    }

    /// Requests the next step while paused. No-op when disabled.
    pub fn next_clicked(&self) -> Option<ClientMessage> {
        self.playback.next_enabled.then_some(ClientMessage::Next)
    }

    /// Requests the previous step while paused or finished. No-op when
    /// disabled.
    pub fn previous_clicked(&self) -> Option<ClientMessage> {
        self.playback
            .previous_enabled
            .then_some(ClientMessage::Previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn replay_session() -> Session {
        let mut session = Session::new();
        session.apply_config(GameMode::Replay);
        session
    }

    /// A session with `ACTIONS\n-1\n3\n1 2 2 2\n1 2 2 3` applied.
    fn session_with_moves() -> Session {
        let mut session = Session::new();
        session.apply_config(GameMode::HumanVsAi);
        session.announce_moves(
            Player::Two,
            3,
            &[(pos(1, 2), pos(2, 2)), (pos(1, 2), pos(2, 3))],
        );
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::AwaitingConfig);
        assert_eq!(session.mode(), None);
        assert_eq!(session.score(Player::One), 24);
        assert_eq!(session.score(Player::Two), 24);
        assert_eq!(session.step(), 1);
        assert_eq!(session.selected(), None);
        assert!(session.moves().is_empty());
        assert!(!session.playback().visible);
        assert!(session.playback().playing);
    }

    #[test]
    fn test_apply_config_replay() {
        let mut session = Session::new();
        let reply = session.apply_config(GameMode::Replay);

        assert_eq!(reply, ClientMessage::Ready(GameMode::Replay));
        assert_eq!(reply.encode(), "READY\nreplay");
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.mode(), Some(GameMode::Replay));

        let playback = session.playback();
        assert!(playback.visible);
        assert!(playback.play_pause_enabled);
        assert!(!playback.next_enabled);
        assert!(!playback.previous_enabled);
        assert_eq!(session.status().primary, "Step 1: Player 1's turn");
        assert_eq!(session.status().secondary, "");
    }

    #[test]
    fn test_apply_config_interactive() {
        let mut session = Session::new();
        let reply = session.apply_config(GameMode::AiVsAi);

        assert_eq!(reply, ClientMessage::Ready(GameMode::AiVsAi));
        let playback = session.playback();
        assert!(!playback.visible);
        assert!(!playback.play_pause_enabled);
        assert!(!playback.next_enabled);
        assert!(!playback.previous_enabled);
    }

    #[test]
    fn test_handle_config_replies_ready() {
        let mut session = Session::new();
        let reply = session
            .handle_message(ServerMessage::Config(GameMode::HumanVsHuman))
            .unwrap();
        assert_eq!(reply, Some(ClientMessage::Ready(GameMode::HumanVsHuman)));
    }

    #[test]
    fn test_announce_moves() {
        let session = session_with_moves();
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.step(), 3);
        assert_eq!(session.moves().move_count(), 2);
        assert!(session.moves().contains_source(pos(1, 2)));
        assert_eq!(session.status().primary, "Step 3: Player 2's turn");
        assert_eq!(session.status().secondary, "Click on a tower to select it.");
    }

    #[test]
    fn test_announce_moves_replaces_and_drops_selection() {
        let mut session = session_with_moves();
        session.select_tower(pos(1, 2));
        assert_eq!(session.selected(), Some(pos(1, 2)));

        session.announce_moves(Player::One, 4, &[(pos(4, 0), pos(4, 1))]);
        assert_eq!(session.selected(), None);
        assert!(!session.moves().contains_source(pos(1, 2)));
        assert!(session.moves().contains_source(pos(4, 0)));
    }

    #[test]
    fn test_select_requires_announced_source() {
        let mut session = session_with_moves();
        session.select_tower(pos(4, 0));
        assert_eq!(session.selected(), None);

        session.select_tower(pos(1, 2));
        assert_eq!(session.selected(), Some(pos(1, 2)));
        assert_eq!(session.status().secondary, "Click on a tower to stack on.");
    }

    #[test]
    fn test_select_ignored_while_selected() {
        let mut session = Session::new();
        session.announce_moves(
            Player::One,
            2,
            &[(pos(1, 2), pos(2, 2)), (pos(4, 0), pos(4, 1))],
        );
        session.select_tower(pos(1, 2));
        session.select_tower(pos(4, 0));
        assert_eq!(session.selected(), Some(pos(1, 2)));
    }

    #[test]
    fn test_deselect_restores_prompt() {
        let mut session = session_with_moves();
        session.select_tower(pos(1, 2));
        session.deselect_tower(pos(2, 2));
        assert_eq!(session.selected(), Some(pos(1, 2)));

        session.deselect_tower(pos(1, 2));
        assert_eq!(session.selected(), None);
        assert_eq!(session.status().secondary, "Click on a tower to select it.");
    }

    #[test]
    fn test_confirm_move_emits_move_and_clears_index() {
        let mut session = session_with_moves();
        session.select_tower(pos(1, 2));
        let board_before = session.board().clone();

        let reply = session.confirm_move(pos(2, 2));
        assert_eq!(
            reply,
            Some(ClientMessage::Move {
                from: pos(1, 2),
                to: pos(2, 2),
            })
        );
        assert_eq!(reply.unwrap().encode(), "MOVE\n1\n2\n2\n2");
        assert_eq!(session.selected(), None);
        assert!(session.moves().is_empty());
        assert_eq!(session.board(), &board_before);
    }

    #[test]
    fn test_confirm_move_rejects_unannounced_destination() {
        let mut session = session_with_moves();
        session.select_tower(pos(1, 2));

        assert_eq!(session.confirm_move(pos(5, 5)), None);
        assert_eq!(session.selected(), Some(pos(1, 2)));
        assert_eq!(session.moves().move_count(), 2);
    }

    #[test]
    fn test_tower_clicked_full_flow() {
        let mut session = session_with_moves();

        // Click on a non-source: nothing happens.
        assert_eq!(session.tower_clicked(pos(5, 5)), None);
        assert_eq!(session.selected(), None);

        // Select, deselect, select again, then commit.
        assert_eq!(session.tower_clicked(pos(1, 2)), None);
        assert_eq!(session.selected(), Some(pos(1, 2)));
        assert_eq!(session.tower_clicked(pos(1, 2)), None);
        assert_eq!(session.selected(), None);
        assert_eq!(session.tower_clicked(pos(1, 2)), None);

        let reply = session.tower_clicked(pos(2, 3));
        assert_eq!(
            reply,
            Some(ClientMessage::Move {
                from: pos(1, 2),
                to: pos(2, 3),
            })
        );
    }

    #[test]
    fn test_forward_move_updates_board_scores_and_turn() {
        let mut session = Session::new();
        session.apply_config(GameMode::HumanVsHuman);

        // (1,2) is Player 2's tower, (2,2) Player 1's: Player 1 absorbed.
        let reply = session
            .handle_message(ServerMessage::Play {
                mover: Player::One,
                step: 5,
                from: pos(1, 2),
                to: pos(2, 2),
                finish: vec![],
            })
            .unwrap();

        assert_eq!(reply, Some(ClientMessage::Acknowledgement));
        assert_eq!(
            session.board().tower(pos(2, 2)),
            Tower::Stack {
                owner: Player::Two,
                height: 2,
            }
        );
        assert_eq!(session.board().tower(pos(1, 2)), Tower::Empty);
        assert_eq!(session.score(Player::One), 23);
        assert_eq!(session.score(Player::Two), 24);
        assert_eq!(session.current_player(), Player::Two);
        assert_eq!(session.step(), 7);
        assert_eq!(session.status().primary, "Step 7: Player 2's turn");
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn test_forward_move_while_paused_enables_previous() {
        let mut session = replay_session();
        session.play_pause_clicked();
        assert!(!session.playback().playing);
        session.playback.previous_enabled = false;

        session
            .apply_forward_move(Player::One, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        assert!(session.playback().previous_enabled);
    }

    #[test]
    fn test_forward_move_rejected_leaves_state_untouched() {
        let mut session = Session::new();
        session.apply_config(GameMode::HumanVsHuman);
        let before = session.clone();

        // (0,0) is outside the playable shape.
        let result = session.handle_message(ServerMessage::Play {
            mover: Player::One,
            step: 5,
            from: pos(0, 0),
            to: pos(2, 2),
            finish: vec![],
        });

        assert!(result.is_err());
        assert_eq!(session.board(), before.board());
        assert_eq!(session.score(Player::One), 24);
        assert_eq!(session.step(), before.step());
        assert_eq!(session.status(), before.status());
    }

    #[test]
    fn test_undo_is_exact_inverse() {
        let mut session = Session::new();
        session.apply_config(GameMode::Replay);
        let board_before = session.board().clone();
        let former_from = session.board().tower(pos(1, 2));
        let former_to = session.board().tower(pos(2, 2));

        session
            .apply_forward_move(Player::Two, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        assert_eq!(session.score(Player::One), 23);

        session
            .apply_undo_move(Player::Two, 0, pos(1, 2), pos(2, 2), former_from, former_to)
            .unwrap();

        assert_eq!(session.board(), &board_before);
        assert_eq!(session.score(Player::One), 24);
        assert_eq!(session.score(Player::Two), 24);
        assert_eq!(session.step(), 1);
        assert_eq!(session.current_player(), Player::Two);
    }

    #[test]
    fn test_undo_button_effects() {
        let mut session = replay_session();
        session.play_pause_clicked();

        session
            .apply_forward_move(Player::One, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        session
            .apply_undo_move(
                Player::One,
                0,
                pos(1, 2),
                pos(2, 2),
                Tower::Stack {
                    owner: Player::Two,
                    height: 1,
                },
                Tower::Stack {
                    owner: Player::One,
                    height: 1,
                },
            )
            .unwrap();

        // Back at step 1: nothing further back.
        let playback = session.playback();
        assert!(!playback.previous_enabled);
        assert!(playback.play_pause_enabled);
        assert!(playback.next_enabled);
        assert_eq!(session.status().primary, "Step 1: Player 1's turn");
    }

    #[test]
    fn test_score_sum_tracks_forward_moves() {
        let mut session = Session::new();
        session.apply_config(GameMode::AiVsAi);

        session
            .apply_forward_move(Player::One, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        session
            .apply_forward_move(Player::Two, 1, pos(4, 0), pos(4, 1), &[])
            .unwrap();

        let sum = session.score(Player::One) + session.score(Player::Two);
        assert_eq!(sum, 48 - 2);
    }

    #[test]
    fn test_live_winner_by_score() {
        let mut session = Session::new();
        session.scores = [30, 18];
        assert_eq!(session.live_winner(), Winner::Player(Player::One));

        session.scores = [18, 30];
        assert_eq!(session.live_winner(), Winner::Player(Player::Two));
    }

    #[test]
    fn test_live_winner_tie_without_full_towers() {
        let session = Session::new();
        assert_eq!(session.live_winner(), Winner::Draw);
    }

    #[test]
    fn test_live_winner_tie_breaks_on_full_towers() {
        let mut session = Session::new();
        let mut grid = [[0i8; 9]; 9];
        grid[3][1] = -5;
        session.board = Board::from_signed_grid(grid);
        assert_eq!(session.live_winner(), Winner::Player(Player::Two));
    }

    #[test]
    fn test_finished() {
        let mut session = session_with_moves();
        session.select_tower(pos(1, 2));

        session.finish(&[
            "Step 37: Game Over".to_string(),
            "Player 2 wins".to_string(),
        ]);

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.selected(), None);
        assert!(session.moves().is_empty());
        assert_eq!(session.status().primary, "Step 37: Game Over");
        assert_eq!(session.status().secondary, "Player 2 wins");

        let playback = session.playback();
        assert!(playback.visible);
        assert!(!playback.next_enabled);
        assert!(!playback.play_pause_enabled);
        assert!(!playback.playing);
        assert!(playback.previous_enabled);
    }

    #[test]
    fn test_forward_move_chains_into_finish() {
        let mut session = replay_session();
        let reply = session
            .handle_message(ServerMessage::Play {
                mover: Player::One,
                step: 5,
                from: pos(1, 2),
                to: pos(2, 2),
                finish: vec!["Step 6: Game Over".to_string(), "Player 1 wins".to_string()],
            })
            .unwrap();

        // The move still gets acknowledged after the finish handling.
        assert_eq!(reply, Some(ClientMessage::Acknowledgement));
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.status().primary, "Step 6: Game Over");
        assert_eq!(session.status().secondary, "Player 1 wins");
        assert_eq!(session.board().tower(pos(1, 2)), Tower::Empty);
    }

    #[test]
    fn test_play_pause_toggle() {
        let mut session = Session::new();
        assert_eq!(session.play_pause_clicked(), None);

        session.apply_config(GameMode::Replay);
        assert_eq!(session.play_pause_clicked(), Some(ClientMessage::Pause));
        let playback = session.playback();
        assert!(!playback.playing);
        assert!(playback.next_enabled);
        // Still at step 1: nothing to rewind to.
        assert!(!playback.previous_enabled);

        assert_eq!(session.play_pause_clicked(), Some(ClientMessage::Resume));
        let playback = session.playback();
        assert!(playback.playing);
        assert!(!playback.next_enabled);
        assert!(!playback.previous_enabled);
    }

    #[test]
    fn test_pause_past_step_one_enables_previous() {
        let mut session = replay_session();
        session
            .apply_forward_move(Player::One, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        assert_eq!(session.step(), 2);

        session.play_pause_clicked();
        assert!(session.playback().previous_enabled);
    }

    #[test]
    fn test_next_and_previous_guards() {
        let mut session = replay_session();
        assert_eq!(session.next_clicked(), None);
        assert_eq!(session.previous_clicked(), None);

        session.play_pause_clicked();
        assert_eq!(session.next_clicked(), Some(ClientMessage::Next));
        assert_eq!(session.previous_clicked(), None);
    }

    #[test]
    fn test_review_after_finish() {
        let mut session = replay_session();
        session
            .apply_forward_move(Player::One, 0, pos(1, 2), pos(2, 2), &[])
            .unwrap();
        session.finish(&["Step 2: Game Over".to_string()]);

        // Only previous works now.
        assert_eq!(session.next_clicked(), None);
        assert_eq!(session.play_pause_clicked(), None);
        assert_eq!(session.previous_clicked(), Some(ClientMessage::Previous));

        session
            .apply_undo_move(
                Player::One,
                0,
                pos(1, 2),
                pos(2, 2),
                Tower::Stack {
                    owner: Player::Two,
                    height: 1,
                },
                Tower::Stack {
                    owner: Player::One,
                    height: 1,
                },
            )
            .unwrap();

        assert_eq!(session.phase(), Phase::InProgress);
        assert!(session.playback().play_pause_enabled);
        assert!(session.playback().next_enabled);
        // Paused after the finish: resuming sends PLAY.
        assert_eq!(session.play_pause_clicked(), Some(ClientMessage::Resume));
    }
}
