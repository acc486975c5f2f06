//! Admin login form

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{fg, screen_block};
use crate::app::{AppState, LoginField};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = screen_block(state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let login = &state.login;

    let username = field(
        state,
        "Username",
        &login.username,
        "Enter username",
        login.focus == LoginField::Username,
    );
    frame.render_widget(username, chunks[0]);

    let password = if login.reveal_password {
        login.password.clone()
    } else {
        mask(state, &login.password)
    };
    let password = field(
        state,
        "Password",
        &password,
        "Enter password",
        login.focus == LoginField::Password,
    );
    frame.render_widget(password, chunks[1]);
}

/// Replace every character with a mask symbol
pub fn mask(state: &AppState, password: &str) -> String {
    let symbol = if state.config.unicode_enabled { '•' } else { '*' };
    password.chars().map(|_| symbol).collect()
}

fn field<'a>(state: &AppState, title: &'a str, value: &str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        fg(state, Color::Cyan)
    } else {
        fg(state, Color::DarkGray)
    };

    let line = if value.is_empty() {
        Line::styled(placeholder, fg(state, Color::DarkGray))
    } else {
        Line::raw(value.to_string())
    };

    Paragraph::new(line).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(border),
    )
}
