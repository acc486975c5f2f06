//! Report creation form

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use libfixmycity::IssueType;

use super::editor::Editors;
use super::{fg, screen_block, selected_style};
use crate::app::AppState;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, editors: &Editors) {
    let block = screen_block(state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Issue type
            Constraint::Min(5),    // Description editor
            Constraint::Length(1), // Validation
            Constraint::Length(4), // Attachments
        ])
        .split(inner);

    render_type_selector(frame, chunks[0], state);
    frame.render_widget(&editors.description, chunks[1]);
    render_validation(frame, chunks[2], state);
    render_attachments(frame, chunks[3], state);
}

fn render_type_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = Vec::new();
    for issue_type in IssueType::ALL {
        let label = format!(" {} ", issue_type);
        if issue_type == state.create.draft.issue_type {
            spans.push(Span::styled(label, selected_style(state)));
        } else {
            spans.push(Span::raw(label));
        }
        spans.push(Span::raw(" "));
    }

    let selector = Paragraph::new(Line::from(spans))
        .block(Block::default().title(" Type (Tab) ").borders(Borders::ALL));
    frame.render_widget(selector, area);
}

fn render_validation(frame: &mut Frame, area: Rect, state: &AppState) {
    let create = &state.create;
    let (symbol, color) = if create.valid {
        ("OK", Color::Green)
    } else {
        ("!!", Color::Red)
    };
    let detail = if create.errors.is_empty() {
        "Ready to submit".to_string()
    } else {
        create.errors.join(", ")
    };

    let line = Line::from(vec![
        Span::styled(symbol, fg(state, color).add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {} chars | {}", create.char_count, detail)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_attachments(frame: &mut Frame, area: Rect, state: &AppState) {
    let draft = &state.create.draft;

    let photo = if state.create.capturing_photo {
        Span::styled("capturing...", fg(state, Color::Yellow))
    } else {
        match draft.image {
            Some(ref image) => Span::styled(image.uri().to_string(), fg(state, Color::Green)),
            None => Span::styled("none (Ctrl+P)", fg(state, Color::DarkGray)),
        }
    };

    let location = if state.create.capturing_location {
        Span::styled("locating...", fg(state, Color::Yellow))
    } else {
        match draft.location {
            Some(location) => Span::styled(location.to_string(), fg(state, Color::Green)),
            None => Span::styled("none (Ctrl+L)", fg(state, Color::DarkGray)),
        }
    };

    let attachments = Paragraph::new(vec![
        Line::from(vec![Span::raw("Photo:    "), photo]),
        Line::from(vec![Span::raw("Location: "), location]),
    ])
    .block(Block::default().title(" Attachments ").borders(Borders::ALL))
    .wrap(Wrap { trim: true });
    frame.render_widget(attachments, area);
}
