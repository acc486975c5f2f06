//! Community report list

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use libfixmycity::Report;

use super::{bullet, fg, screen_block, selected_style};
use crate::app::AppState;

pub const EMPTY_MESSAGE: &str = "No reports yet - be the first!";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.reports.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_MESSAGE, fg(state, Color::Gray))),
            Line::from(""),
            Line::from("Press n to report an issue"),
        ])
        .block(screen_block(state))
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .reports
        .iter()
        .map(|report| ListItem::new(report_lines(state, report)))
        .collect();

    let list = List::new(items)
        .block(screen_block(state))
        .highlight_style(selected_style(state))
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(state.list_selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Card for one report: headline, status line, optional coordinates
pub(crate) fn report_lines<'a>(state: &AppState, report: &'a Report) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                report.issue_type.as_str(),
                fg(state, Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::raw(report.description.as_str()),
        ]),
        Line::from(Span::styled(
            format!(
                "Status: {}{}Upvotes: {}{}",
                report.status,
                bullet(state),
                report.upvotes,
                if report.image.is_some() { "  [photo]" } else { "" },
            ),
            fg(state, Color::Gray),
        )),
    ];
    if let Some(location) = report.location {
        lines.push(Line::from(Span::styled(
            location.to_string(),
            fg(state, Color::DarkGray),
        )));
    }
    lines
}
