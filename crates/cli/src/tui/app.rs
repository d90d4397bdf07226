//! Application state and main loop for the TUI.

use avalam_core::constants::BOARD_SIZE;
use avalam_core::position::Position;
use avalam_core::protocol::{ClientMessage, ServerMessage};
use avalam_core::session::Session;
use crossterm::event::EventStream;
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info, warn};

use crate::net::Connection;

use super::event::{self, Event};
use super::render;

/// UI mode for handling different interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal game play mode
    Normal,
    /// Confirming quit
    ConfirmQuit,
}

/// Main application state.
pub struct App {
    /// Session state mirrored from the controller
    pub session: Session,
    /// Connection to the controller
    connection: Connection,
    /// Current UI mode
    pub ui_mode: UiMode,
    /// Cursor position on the board (0-8 for both row and col)
    pub cursor: (usize, usize),
    /// Destination of the last broadcast move, for highlighting
    pub last_move: Option<Position>,
    /// Whether the server closed the connection
    pub connection_lost: bool,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl App {
    /// Creates a new App instance.
    pub fn new(connection: Connection) -> Self {
        Self {
            session: Session::new(),
            connection,
            ui_mode: UiMode::Normal,
            cursor: (4, 4), // Start at center
            last_move: None,
            connection_lost: false,
            should_quit: false,
        }
    }

    /// Runs the main TUI loop.
    ///
    /// Inbound frames and terminal events are raced; whichever arrives first
    /// updates the state before the next draw. Returns the final session
    /// once the user quits.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> std::io::Result<Session> {
        // Enable mouse capture
        crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;

        let mut events = EventStream::new();

        loop {
            // Draw the UI
            terminal.draw(|frame| render::render(frame, &self))?;

            tokio::select! {
                frame = self.connection.next_frame(), if !self.connection_lost => {
                    match frame {
                        Some(Ok(text)) => self.handle_frame(&text).await,
                        Some(Err(err)) => warn!(error = %err, "transport error"),
                        None => {
                            info!("server closed the connection");
                            self.connection_lost = true;
                        }
                    }
                }
                event = events.next() => {
                    match event {
                        Some(Ok(raw)) => {
                            if let Some(event) = event::map_event(raw) {
                                self.handle_event(event).await;
                            }
                        }
                        Some(Err(err)) => return Err(err),
                        None => break,
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        if !self.connection_lost {
            let _ = self.connection.close().await;
        }

        // Disable mouse capture on exit
        crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture)?;

        Ok(self.session)
    }

    /// Applies one inbound frame to the session.
    ///
    /// Frames that fail to parse or that the board rejects are dropped whole
    /// with a log entry; the session never sees a partial update.
    async fn handle_frame(&mut self, text: &str) {
        let message = match ServerMessage::parse(text) {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, frame = ?text, "dropping malformed frame");
                return;
            }
        };
        debug!(message = ?message, "frame received");

        match &message {
            ServerMessage::Play { to, .. } => self.last_move = Some(*to),
            ServerMessage::Previous { .. } => self.last_move = None,
            _ => {}
        }

        match self.session.handle_message(message) {
            Ok(Some(reply)) => self.send(reply).await,
            Ok(None) => {}
            Err(err) => warn!(error = %err, "dropping inconsistent frame"),
        }
    }

    /// Sends one message, logging transport failures instead of surfacing
    /// them to the UI.
    async fn send(&mut self, message: ClientMessage) {
        if self.connection_lost {
            return;
        }
        if let Err(err) = self.connection.send(&message).await {
            warn!(error = %err, "send failed, giving up on the connection");
            self.connection_lost = true;
        }
    }

    /// Handles an input event.
    async fn handle_event(&mut self, event: Event) {
        match self.ui_mode {
            UiMode::Normal => self.handle_normal_event(event).await,
            UiMode::ConfirmQuit => self.handle_confirm_quit_event(event),
        }
    }

    /// Handles events in normal game mode.
    async fn handle_normal_event(&mut self, event: Event) {
        match event {
            Event::ForceQuit => {
                self.should_quit = true;
            }
            Event::Quit => {
                self.ui_mode = UiMode::ConfirmQuit;
            }
            Event::CursorUp => {
                if self.cursor.0 > 0 {
                    self.cursor.0 -= 1;
                }
            }
            Event::CursorDown => {
                if self.cursor.0 < BOARD_SIZE - 1 {
                    self.cursor.0 += 1;
                }
            }
            Event::CursorLeft => {
                if self.cursor.1 > 0 {
                    self.cursor.1 -= 1;
                }
            }
            Event::CursorRight => {
                if self.cursor.1 < BOARD_SIZE - 1 {
                    self.cursor.1 += 1;
                }
            }
            Event::Select => {
                self.click_cursor().await;
            }
            Event::Click(row, col) => {
                if row < BOARD_SIZE && col < BOARD_SIZE {
                    self.cursor = (row, col);
                    self.click_cursor().await;
                }
            }
            Event::PlayPause => {
                if let Some(reply) = self.session.play_pause_clicked() {
                    self.send(reply).await;
                }
            }
            Event::NextStep => {
                if let Some(reply) = self.session.next_clicked() {
                    self.send(reply).await;
                }
            }
            Event::PreviousStep => {
                if let Some(reply) = self.session.previous_clicked() {
                    self.send(reply).await;
                }
            }
            Event::Char(_) => {}
        }
    }

    /// Handles events in quit confirmation mode.
    fn handle_confirm_quit_event(&mut self, event: Event) {
        match event {
            Event::ForceQuit | Event::Char('y') | Event::Char('Y') => {
                self.should_quit = true;
            }
            Event::Char('n') | Event::Char('N') | Event::Quit => {
                self.ui_mode = UiMode::Normal;
            }
            _ => {}
        }
    }

    /// Routes a click on the cursor cell through the session.
    async fn click_cursor(&mut self) {
        let Some(pos) = Position::new(self.cursor.0, self.cursor.1) else {
            return;
        };
        if let Some(reply) = self.session.tower_clicked(pos) {
            info!(reply = ?reply, "move confirmed");
            self.send(reply).await;
        }
    }
}
