//! Admin dashboard: heat map of reports plus a triage list
//!
//! The map is a canvas in degrees. Longitude runs along x, latitude along y,
//! and circle radii are converted from metres at roughly 111 km per degree.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    symbols,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, List, ListItem, ListState,
    },
    Frame,
};

use libfixmycity::service::dashboard::{self, HeatCircle, Region};

use super::list::report_lines;
use super::{fg, screen_block, selected_style};
use crate::app::AppState;

const METRES_PER_DEGREE: f64 = 111_320.0;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = screen_block(state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    render_map(frame, chunks[0], state);
    render_reports(frame, chunks[1], state);
}

/// Region currently shown: the focused report, or the overview
pub fn visible_region(state: &AppState) -> Region {
    state
        .dashboard
        .focused
        .unwrap_or_else(|| dashboard::initial_region(&state.reports, state.default_center))
}

/// Terminals have no alpha, so opacity dims the overlay towards black
fn circle_color(state: &AppState, circle: &HeatCircle) -> Color {
    if !state.config.colors_enabled {
        return Color::Reset;
    }
    let (r, g, b) = circle.color.rgb();
    let shade = |channel: u8| (f64::from(channel) * (0.5 + circle.opacity)).round() as u8;
    Color::Rgb(shade(r), shade(g), shade(b))
}

fn render_map(frame: &mut Frame, area: Rect, state: &AppState) {
    let region = visible_region(state);
    let half_lat = region.latitude_delta / 2.0;
    let half_lng = region.longitude_delta / 2.0;

    let circles = dashboard::heat_circles(&state.reports);
    let markers = dashboard::markers(&state.reports);
    let selected = state.selected_dashboard_report().map(|r| r.id);

    let canvas = Canvas::default()
        .block(Block::default().title(" Map ").borders(Borders::ALL))
        .marker(symbols::Marker::Braille)
        .x_bounds([region.center.longitude - half_lng, region.center.longitude + half_lng])
        .y_bounds([region.center.latitude - half_lat, region.center.latitude + half_lat])
        .paint(move |ctx| {
            for circle in &circles {
                ctx.draw(&Circle {
                    x: circle.center.longitude,
                    y: circle.center.latitude,
                    radius: circle.radius / METRES_PER_DEGREE,
                    color: circle_color(state, circle),
                });
            }
            ctx.layer();
            for marker in &markers {
                let color = if Some(marker.report_id) == selected {
                    Color::Cyan
                } else {
                    Color::White
                };
                let coords = [(marker.coordinate.longitude, marker.coordinate.latitude)];
                ctx.draw(&Points {
                    coords: &coords,
                    color,
                });
                if Some(marker.report_id) == selected {
                    ctx.print(
                        marker.coordinate.longitude,
                        marker.coordinate.latitude,
                        Line::styled(marker.title.as_str(), fg(state, Color::Cyan)),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn render_reports(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .reports
        .iter()
        .map(|report| ListItem::new(report_lines(state, report)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Reports ({}) ", state.reports.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(selected_style(state))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.reports.is_empty() {
        list_state.select(Some(state.dashboard.selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}
