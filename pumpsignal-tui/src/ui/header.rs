//! Header — logo, live indicator and the radar sweep.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use pumpsignal_core::radar::{self, CENTER, OUTER_RADIUS};

use crate::app::AppState;
use crate::theme;

const RADAR_WIDTH: u16 = 28;
const RING_RADII: [f64; 3] = [15.0, 30.0, OUTER_RADIUS];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(RADAR_WIDTH)])
        .split(area);

    render_brand(f, chunks[0], app);
    render_radar(f, chunks[1], app);
}

fn render_brand(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));

    let refreshed = app
        .last_refresh
        .map(|t| t.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "waiting for feed".into());

    let lines = vec![
        Line::from(vec![
            Span::styled(" ▲ ", theme::positive_bold()),
            Span::styled("PUMPSIGNAL", theme::positive_bold()),
        ]),
        Line::from(Span::styled("   insider flow scanner", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ● LIVE ", theme::positive()),
            Span::styled(" SOLANA ", theme::accent_bold()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" feed ", theme::muted()),
            Span::styled(app.feed_name.as_str(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled(" last ", theme::muted()),
            Span::styled(refreshed, theme::text()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_radar(f: &mut Frame, area: Rect, app: &AppState) {
    let dashboard = &app.dashboard;
    let high = dashboard.aggregates().high_potential_count;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title_bottom(Line::from(Span::styled(
            format!(" {high} HIGH SIGNALS "),
            theme::positive_bold(),
        )));

    // The layout plane grows downward; the canvas grows upward.
    let blips: Vec<(f64, f64)> = dashboard
        .blips()
        .iter()
        .map(|b| {
            let (x, y) = b.project();
            (x, 100.0 - y)
        })
        .collect();
    let (sweep_x, sweep_y) = radar::sweep_endpoint(f64::from(dashboard.rotation()));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, 100.0])
        .y_bounds([0.0, 100.0])
        .paint(move |ctx| {
            for radius in RING_RADII {
                ctx.draw(&Circle {
                    x: CENTER,
                    y: CENTER,
                    radius,
                    color: theme::GRID,
                });
            }
            ctx.draw(&CanvasLine {
                x1: CENTER,
                y1: CENTER - OUTER_RADIUS,
                x2: CENTER,
                y2: CENTER + OUTER_RADIUS,
                color: theme::GRID,
            });
            ctx.draw(&CanvasLine {
                x1: CENTER - OUTER_RADIUS,
                y1: CENTER,
                x2: CENTER + OUTER_RADIUS,
                y2: CENTER,
                color: theme::GRID,
            });
            ctx.layer();
            ctx.draw(&CanvasLine {
                x1: CENTER,
                y1: CENTER,
                x2: sweep_x,
                y2: 100.0 - sweep_y,
                color: theme::POSITIVE,
            });
            for &(x, y) in &blips {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: 2.0,
                    color: theme::POSITIVE,
                });
            }
            ctx.draw(&Points {
                coords: &blips,
                color: theme::TEXT,
            });
        });

    f.render_widget(canvas, area);
}
