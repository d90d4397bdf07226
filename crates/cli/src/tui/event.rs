//! Event handling for the TUI.

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// Application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Quit the application
    Quit,
    /// Force quit the application (Ctrl+C)
    ForceQuit,
    /// Move cursor up
    CursorUp,
    /// Move cursor down
    CursorDown,
    /// Move cursor left
    CursorLeft,
    /// Move cursor right
    CursorRight,
    /// Select/confirm action (Enter)
    Select,
    /// Mouse click at board position (row, col)
    Click(usize, usize),
    /// Toggle replay playback (Space)
    PlayPause,
    /// Request the next step while paused
    NextStep,
    /// Request the previous step while paused
    PreviousStep,
    /// Character input (for dialogs)
    Char(char),
}

/// Board area configuration for mouse click detection.
/// These values should match the render layout.
pub struct BoardArea {
    pub start_row: u16,
    pub start_col: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for BoardArea {
    fn default() -> Self {
        Self {
            // Layout calculation:
            // - Title block: 3 rows (y=0-2)
            // - Content starts at y=3
            // - Board block border: +1 row
            // - Board inner area starts at y=4
            // - Column header row: y=4
            // - Top border row: y=5
            // - First cell row (row=0): y=6
            start_row: 6,
            // - Board block border: +1 col
            // - Row number + separator: 3 chars ("0 │")
            // - Cell content starts at x=4 (1 + 3)
            start_col: 4,
            cell_width: 4,  // Each cell is 4 chars wide (" X │")
            cell_height: 2, // Each cell is 2 rows tall (content + separator)
        }
    }
}

/// Maps a raw terminal event to an application event.
pub fn map_event(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
            // Check for Ctrl+C
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c'))
            {
                return Some(Event::ForceQuit);
            }
            Some(map_key_event(key.code))
        }
        CrosstermEvent::Mouse(mouse) => map_mouse_event(mouse),
        _ => None,
    }
}

/// Maps a key code to an application event.
fn map_key_event(code: KeyCode) -> Event {
    match code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Event::Quit,

        // Cursor movement - Arrow keys
        KeyCode::Up => Event::CursorUp,
        KeyCode::Down => Event::CursorDown,
        KeyCode::Left => Event::CursorLeft,
        KeyCode::Right => Event::CursorRight,

        // Cursor movement - WASD
        KeyCode::Char('w') => Event::CursorUp,
        KeyCode::Char('s') => Event::CursorDown,
        KeyCode::Char('a') => Event::CursorLeft,
        KeyCode::Char('d') => Event::CursorRight,

        // Cursor movement - Vim style
        KeyCode::Char('k') => Event::CursorUp,
        KeyCode::Char('j') => Event::CursorDown,
        KeyCode::Char('h') => Event::CursorLeft,
        KeyCode::Char('l') => Event::CursorRight,

        // Selection
        KeyCode::Enter => Event::Select,

        // Playback controls
        KeyCode::Char(' ') => Event::PlayPause,
        KeyCode::Char('n') => Event::NextStep,
        KeyCode::Char('p') => Event::PreviousStep,

        // Other characters
        KeyCode::Char(c) => Event::Char(c),

        // Default
        _ => Event::Char('\0'),
    }
}

/// Maps a mouse event to an application event.
fn map_mouse_event(mouse: MouseEvent) -> Option<Event> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let board_area = BoardArea::default();

            // Check if click is within board area
            if mouse.row >= board_area.start_row && mouse.column >= board_area.start_col {
                let row = (mouse.row - board_area.start_row) / board_area.cell_height;
                let col = (mouse.column - board_area.start_col) / board_area.cell_width;

                if row < 9 && col < 9 {
                    return Some(Event::Click(row as usize, col as usize));
                }
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_click_maps_to_cells() {
        assert_eq!(map_mouse_event(click(4, 6)), Some(Event::Click(0, 0)));
        assert_eq!(map_mouse_event(click(7, 7)), Some(Event::Click(0, 0)));
        assert_eq!(map_mouse_event(click(8, 8)), Some(Event::Click(1, 1)));
        assert_eq!(map_mouse_event(click(36, 22)), Some(Event::Click(8, 8)));
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        assert_eq!(map_mouse_event(click(0, 0)), None);
        assert_eq!(map_mouse_event(click(3, 6)), None);
        assert_eq!(map_mouse_event(click(40, 6)), None);
        assert_eq!(map_mouse_event(click(4, 24)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = CrosstermEvent::Key(crossterm::event::KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
    }
}
