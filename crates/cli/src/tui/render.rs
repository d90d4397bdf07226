//! Rendering logic for the TUI.

use avalam_core::mode::GameMode;
use avalam_core::player::Player;
use avalam_core::session::{Phase, Playback, Winner};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, UiMode};
use super::widgets::BoardWidget;

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: title, content, help bar
    let main_layout = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(23),   // Content
        Constraint::Length(3), // Help bar
    ])
    .split(area);

    render_title(frame, main_layout[0]);
    render_content(frame, main_layout[1], app);
    render_help_bar(frame, main_layout[2], app);

    if app.ui_mode == UiMode::ConfirmQuit {
        render_quit_dialog(frame);
    }
}

/// Renders the title bar.
fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Avalam ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(title, area);
}

/// Renders the main content area (board + info panel).
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let content_layout = Layout::horizontal([
        Constraint::Length(43), // Board area
        Constraint::Min(24),    // Info panel
    ])
    .split(area);

    render_board(frame, content_layout[0], app);
    render_info_panel(frame, content_layout[1], app);
}

/// Renders the game board.
fn render_board(frame: &mut Frame, area: Rect, app: &App) {
    let board_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Board ");

    let inner_area = board_block.inner(area);
    frame.render_widget(board_block, area);

    let board_widget = BoardWidget::new(app.session.board(), app.session.moves())
        .cursor(app.cursor.0, app.cursor.1)
        .selected(app.session.selected())
        .last_move(app.last_move);

    frame.render_widget(board_widget, inner_area);
}

/// Returns the display color for a player.
fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Green,
        Player::Two => Color::Yellow,
    }
}

/// Renders the information panel.
fn render_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let info_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Info ");

    let inner_area = info_block.inner(area);
    frame.render_widget(info_block, area);

    let session = &app.session;
    let mut lines = Vec::new();

    lines.push(Line::from(""));

    // Status lines mirrored from the controller
    match session.phase() {
        Phase::AwaitingConfig => {
            lines.push(Line::from(Span::styled(
                "Waiting for the game to start...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        Phase::InProgress => {
            lines.push(Line::from(Span::styled(
                session.status().primary.as_str(),
                Style::default().fg(player_color(session.current_player())),
            )));
        }
        Phase::Finished => {
            lines.push(Line::from(Span::styled(
                "*** Game Over ***",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                session.status().primary.as_str(),
                Style::default().fg(Color::White),
            )));
        }
    }
    if !session.status().secondary.is_empty() {
        lines.push(Line::from(Span::styled(
            session.status().secondary.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));

    // Score
    lines.push(Line::from(vec![
        Span::raw("Player 1: "),
        Span::styled(
            format!("{:2}", session.score(Player::One)),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::raw("Player 2: "),
        Span::styled(
            format!("{:2}", session.score(Player::Two)),
            Style::default().fg(Color::Yellow),
        ),
    ]));

    // Leader by live score; the controller has the final word
    let leader = match session.live_winner() {
        Winner::Player(player) => Span::styled(
            format!("{player}"),
            Style::default().fg(player_color(player)),
        ),
        Winner::Draw => Span::styled("Even", Style::default().fg(Color::Cyan)),
    };
    lines.push(Line::from(vec![Span::raw("Leading:  "), leader]));
    lines.push(Line::from(""));

    // Game info
    let mode_label = session.mode().map_or("--", GameMode::wire_name);
    lines.push(Line::from(vec![
        Span::raw("Mode: "),
        Span::styled(mode_label, Style::default().fg(Color::Cyan)),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Step: "),
        Span::styled(
            format!("{}", session.step()),
            Style::default().fg(Color::Cyan),
        ),
    ]));

    // Selection and last move
    if let Some(selected) = session.selected() {
        lines.push(Line::from(vec![
            Span::raw("Selected: "),
            Span::styled(format!("{selected}"), Style::default().fg(Color::Magenta)),
        ]));
    }
    if let Some(last) = app.last_move {
        lines.push(Line::from(vec![
            Span::raw("Last:     "),
            Span::styled(format!("{last}"), Style::default().fg(Color::Magenta)),
        ]));
    }

    // Playback controls
    if session.playback().visible {
        lines.push(Line::from(""));
        lines.push(Line::from("─".repeat(inner_area.width as usize)));
        lines.push(Line::from(Span::styled(
            "Playback:",
            Style::default().fg(Color::Cyan),
        )));
        lines.extend(playback_lines(session.playback()));
    }

    // Connection state
    if app.connection_lost {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Disconnected",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let info = Paragraph::new(lines);
    frame.render_widget(info, inner_area);
}

/// Builds the playback control lines with enabled/disabled styling.
fn playback_lines(playback: Playback) -> Vec<Line<'static>> {
    let control = |label: &'static str, enabled: bool| {
        Span::styled(
            label,
            if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        )
    };

    let play_pause = if playback.playing {
        "[Space] Pause"
    } else {
        "[Space] Resume"
    };

    vec![
        Line::from(vec![
            Span::raw("  "),
            control(play_pause, playback.play_pause_enabled),
        ]),
        Line::from(vec![
            Span::raw("  "),
            control("[N] Next step", playback.next_enabled),
        ]),
        Line::from(vec![
            Span::raw("  "),
            control("[P] Previous step", playback.previous_enabled),
        ]),
    ]
}

/// Renders the help bar at the bottom.
fn render_help_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_items = vec![("↑↓←→", "Cursor"), ("Enter", "Select")];
    if app.session.playback().visible {
        help_items.push(("Space", "Play/Pause"));
        help_items.push(("N", "Next"));
        help_items.push(("P", "Prev"));
    }
    help_items.push(("Q", "Quit"));

    let spans: Vec<Span> = help_items
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!(" [{key}] "),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                ),
                Span::raw(format!("{desc} ")),
            ]
        })
        .collect();

    let help = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(help, area);
}

/// Renders the quit confirmation dialog.
fn render_quit_dialog(frame: &mut Frame) {
    let area = centered_rect(40, 15, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Quit Avalam?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Y to quit, N to cancel"),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Confirm "),
        );
    frame.render_widget(dialog, area);
}

/// Creates a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
