//! Board widget for rendering the Avalam game board.

use avalam_core::board::Board;
use avalam_core::constants::{BOARD_SIZE, MAX_TOWER_HEIGHT};
use avalam_core::moves::MoveIndex;
use avalam_core::player::Player;
use avalam_core::position::Position;
use avalam_core::tower::Tower;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

const TOP_BORDER: &str = "  ┌───┬───┬───┬───┬───┬───┬───┬───┬───┐";
const ROW_SEPARATOR: &str = "  ├───┼───┼───┼───┼───┼───┼───┼───┼───┤";
const BOTTOM_BORDER: &str = "  └───┴───┴───┴───┴───┴───┴───┴───┴───┘";

/// Widget for rendering the Avalam game board.
///
/// Towers show their height in the owner's color; the announced movable
/// towers are underlined, and the destinations of the selected tower get a
/// highlighted background.
pub struct BoardWidget<'a> {
    /// The game board to render
    board: &'a Board,
    /// Legal moves announced for the current turn
    moves: &'a MoveIndex,
    /// Cursor position (row, col)
    cursor: (usize, usize),
    /// Currently selected tower
    selected: Option<Position>,
    /// Destination of the last broadcast move
    last_move: Option<Position>,
    /// Whether to mark movable towers and destinations
    show_moves: bool,
}

impl<'a> BoardWidget<'a> {
    /// Creates a new board widget.
    pub fn new(board: &'a Board, moves: &'a MoveIndex) -> Self {
        Self {
            board,
            moves,
            cursor: (0, 0),
            selected: None,
            last_move: None,
            show_moves: true,
        }
    }

    /// Sets the cursor position.
    pub fn cursor(mut self, row: usize, col: usize) -> Self {
        self.cursor = (row, col);
        self
    }

    /// Sets the selected tower.
    pub fn selected(mut self, selected: Option<Position>) -> Self {
        self.selected = selected;
        self
    }

    /// Sets the last move.
    pub fn last_move(mut self, pos: Option<Position>) -> Self {
        self.last_move = pos;
        self
    }

    /// Sets whether to mark movable towers and destinations.
    #[allow(dead_code)]
    pub fn show_moves(mut self, show: bool) -> Self {
        self.show_moves = show;
        self
    }
}

/// Returns the display color for a player's towers.
fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Green,
        Player::Two => Color::Yellow,
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Minimum size check
        if area.width < 39 || area.height < 21 {
            return;
        }

        // Column headers
        let mut header = vec![Span::raw("    ")];
        for col in 0..BOARD_SIZE {
            header.push(Span::styled(
                format!("{col}"),
                Style::default().fg(Color::Cyan),
            ));
            if col < BOARD_SIZE - 1 {
                header.push(Span::raw("   "));
            }
        }
        buf.set_line(area.x, area.y, &Line::from(header), area.width);

        // Top border
        buf.set_string(area.x, area.y + 1, TOP_BORDER, Style::default());

        // Board rows
        for row in 0..BOARD_SIZE {
            let y = area.y + 2 + (row as u16) * 2;

            // Row number and cells
            let row_num = format!("{row} │");
            buf.set_string(area.x, y, &row_num, Style::default().fg(Color::Cyan));

            for col in 0..BOARD_SIZE {
                let Some(pos) = Position::new(row, col) else {
                    continue;
                };
                let is_cursor = self.cursor == (row, col);
                let is_selected = self.selected == Some(pos);
                let is_source = self.selected.is_none() && self.moves.contains_source(pos);
                let is_destination = self
                    .selected
                    .is_some_and(|from| self.moves.is_move(from, pos));
                let is_last_move = self.last_move == Some(pos);

                // Determine cell content and style
                let (content, mut style) = match self.board.tower(pos) {
                    Tower::NoTile => ("   ".to_string(), Style::default()),
                    Tower::Empty => (" · ".to_string(), Style::default().fg(Color::DarkGray)),
                    Tower::Stack { owner, height } => {
                        let mut style = Style::default().fg(player_color(owner));
                        if height == MAX_TOWER_HEIGHT {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        (format!(" {height} "), style)
                    }
                };

                // Mark movable towers and the selection's destinations
                if self.show_moves {
                    if is_source {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    if is_selected {
                        style = style.bg(Color::Rgb(70, 70, 110));
                    }
                    if is_destination {
                        style = style.bg(Color::Rgb(40, 70, 40));
                    }
                }

                // Apply cursor highlight
                if is_cursor {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }

                // Apply last move highlight
                if is_last_move {
                    style = style.bg(Color::Rgb(50, 50, 80));
                }

                let x = area.x + 3 + (col as u16) * 4;
                buf.set_string(x, y, content, style);

                // Cell separator
                if col < BOARD_SIZE - 1 {
                    buf.set_string(x + 3, y, "│", Style::default());
                }
            }

            // Right border
            buf.set_string(area.x + 38, y, "│", Style::default());

            // Row separator
            if row < BOARD_SIZE - 1 {
                buf.set_string(area.x, y + 1, ROW_SEPARATOR, Style::default());
            }
        }

        // Bottom border
        buf.set_string(area.x, area.y + 19, BOTTOM_BORDER, Style::default());

        // Cursor position indicator
        let cursor_info = format!("  Cursor: {} {}", self.cursor.0, self.cursor.1);
        buf.set_string(
            area.x,
            area.y + 20,
            &cursor_info,
            Style::default().fg(Color::Cyan),
        );
    }
}
