//! Report detail with comments

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use libfixmycity::{Report, ReportId};

use super::editor::Editors;
use super::{fg, screen_block, selected_style};
use crate::app::AppState;

pub const NO_COMMENTS_MESSAGE: &str = "No comments yet. Be first!";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, report_id: ReportId, editors: &Editors) {
    let Some(report) = state.report(report_id) else {
        let missing = Paragraph::new(format!("Report {} not found", report_id)).block(screen_block(state));
        frame.render_widget(missing, area);
        return;
    };

    let block = screen_block(state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary
            Constraint::Min(3),    // Comments
            Constraint::Length(3), // Comment editor
        ])
        .split(inner);

    render_summary(frame, chunks[0], state, report);
    render_comments(frame, chunks[1], state, report);
    frame.render_widget(&editors.comment, chunks[2]);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &AppState, report: &Report) {
    let location = report
        .location
        .map_or_else(|| "Not provided".to_string(), |l| l.to_string());

    let mut lines = vec![
        Line::from(Span::styled(
            report.issue_type.as_str(),
            fg(state, Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(report.description.as_str()),
        Line::from(format!("Status: {}", report.status)),
        Line::from(format!("Upvotes: {}", report.upvotes)),
        Line::from(format!("Location: {}", location)),
    ];
    if let Some(ref image) = report.image {
        lines.push(Line::from(format!("Photo: {}", image)));
    }
    // Hidden once resolved
    if state.can_advance_detail() {
        lines.push(Line::from(Span::styled(
            "[s] Change Status",
            fg(state, Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_comments(frame: &mut Frame, area: Rect, state: &AppState, report: &Report) {
    let block = Block::default()
        .title(format!(" Comments ({}) ", report.comments.len()))
        .borders(Borders::ALL);

    if report.comments.is_empty() {
        let empty = Paragraph::new(Span::styled(NO_COMMENTS_MESSAGE, fg(state, Color::Gray))).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = report
        .comments
        .iter()
        .map(|comment| {
            ListItem::new(Line::from(vec![
                Span::raw(comment.text.as_str()),
                Span::styled(
                    format!("  +{} / -{}", comment.upvotes, comment.downvotes),
                    fg(state, Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style(state))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.detail.selected_comment));
    frame.render_stateful_widget(list, area, &mut list_state);
}
