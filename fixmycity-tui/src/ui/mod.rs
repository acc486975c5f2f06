//! UI rendering
//!
//! Pure rendering functions that transform state into terminal frames.
//! Following FP principles: render functions have no side effects.

pub mod create;
pub mod dashboard;
pub mod detail;
pub mod editor;
pub mod list;
pub mod login;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{Alert, AlertKind, AppState, Screen};
use editor::Editors;

/// Render the application UI
///
/// This is the main rendering entry point.
pub fn render(frame: &mut Frame, state: &AppState, editors: &Editors) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Screen body
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    // Render based on current screen
    match state.current_screen() {
        Screen::ReportList => list::render(frame, chunks[0], state),
        Screen::CreateReport => create::render(frame, chunks[0], state, editors),
        Screen::Detail { report_id, .. } => detail::render(frame, chunks[0], state, report_id, editors),
        Screen::AdminLogin => login::render(frame, chunks[0], state),
        Screen::AdminDashboard => dashboard::render(frame, chunks[0], state),
    }

    render_status_bar(frame, chunks[1], state);

    if state.help_visible {
        render_help_overlay(frame, frame.area(), state);
    }

    if let Some(ref alert) = state.alert {
        render_alert_overlay(frame, frame.area(), alert, state);
    }
}

/// Screen frame with the screen title
pub(crate) fn screen_block(state: &AppState) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", state.current_screen().title()))
        .borders(Borders::ALL)
}

/// Foreground style that respects NO_COLOR
pub(crate) fn fg(state: &AppState, color: Color) -> Style {
    if state.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

/// Row highlight for the selected list entry
pub(crate) fn selected_style(state: &AppState) -> Style {
    if state.config.colors_enabled {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

/// Bullet separator with an ASCII fallback
pub(crate) fn bullet(state: &AppState) -> &'static str {
    if state.config.unicode_enabled {
        " • "
    } else {
        " | "
    }
}

/// Render status bar with the last status message and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = match state.current_screen() {
        Screen::ReportList => "n: New report | Enter: Open | u/d: Vote | a: Admin | F1: Help | q: Quit",
        Screen::CreateReport => "Tab: Type | Ctrl+P: Photo | Ctrl+L: Location | Ctrl+S: Submit | Esc: Back",
        Screen::Detail { .. } if state.detail.commenting => "Enter: Post comment | Esc: Cancel",
        Screen::Detail { .. } => "u/d: Vote | c: Comment | j/k: Select comment | y/x: Vote comment | Esc: Back",
        Screen::AdminLogin => "Tab: Switch field | Ctrl+R: Show password | Enter: Login | Esc: Back",
        Screen::AdminDashboard => "Enter: Open | f: Focus | s: Next status | o: Logout | Esc: Back",
    };

    let mut lines = Vec::new();
    if let Some(ref message) = state.status {
        lines.push(Line::from(Span::styled(
            message.as_str(),
            fg(state, Color::Green).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(hints, fg(state, Color::Gray))));

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    // Center the help box
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q        - Quit (outside text fields)"),
        Line::from("  Ctrl+C   - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Esc      - Back / dismiss"),
        Line::from(""),
        Line::from("Reports:"),
        Line::from("  n        - New report"),
        Line::from("  Enter    - Open report"),
        Line::from("  u / d    - Upvote / downvote"),
        Line::from("  a        - Admin"),
        Line::from(""),
        Line::from("Report detail:"),
        Line::from("  c        - Comment"),
        Line::from("  y / x    - Upvote / downvote comment"),
        Line::from("  s        - Next status (admin)"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(state, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area); // Clear background
    frame.render_widget(help, popup_area);
}

/// Render alert overlay
fn render_alert_overlay(frame: &mut Frame, area: Rect, alert: &Alert, state: &AppState) {
    let popup_area = centered_rect(60, 30, area);

    let (color, heading) = match alert.kind {
        AlertKind::Info => (Color::Cyan, " Notice "),
        AlertKind::Error => (Color::Red, " Error "),
    };

    let text = vec![
        Line::from(Span::styled(
            alert.title.as_str(),
            fg(state, color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(alert.message.as_str()),
        Line::from(""),
        Line::from("Press Enter or Esc to dismiss"),
    ];

    let widget = Paragraph::new(text)
        .block(
            Block::default()
                .title(heading)
                .borders(Borders::ALL)
                .border_style(fg(state, color)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(widget, popup_area);
}

/// Helper to create centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
