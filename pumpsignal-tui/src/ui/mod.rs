//! Top-level UI layout — header with radar, ticker strip, sidebar, signal
//! cards and status bar, with the ambient scanline drawn last.

pub mod filter_tabs;
pub mod header;
pub mod overlays;
pub mod signal_cards;
pub mod stats_panel;
pub mod status_bar;
pub mod ticker_bar;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{AppState, Overlay};
use crate::theme;

const HEADER_HEIGHT: u16 = 12;
const TICKER_HEIGHT: u16 = 3;
const SIDEBAR_WIDTH: u16 = 36;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TICKER_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(30)])
        .split(chunks[2]);

    header::render(f, chunks[0], app);
    ticker_bar::render(f, chunks[1], app);
    stats_panel::render(f, body[0], app);
    signal_cards::render(f, body[1], app);
    status_bar::render(f, chunks[3], app);

    let content = Rect {
        height: f.area().height.saturating_sub(1),
        ..f.area()
    };
    draw_scanline(f.buffer_mut(), content, app.dashboard.scan_offset());

    if app.overlay == Overlay::Help {
        overlays::render_help(f, content, app);
    }
}

/// Row of `area` the scanline sits on at `offset` percent.
pub fn scanline_row(area: Rect, offset: u32) -> Option<u16> {
    if area.height == 0 {
        return None;
    }
    let row = u32::from(area.height) * offset.min(99) / 100;
    Some(area.y + row as u16)
}

fn draw_scanline(buf: &mut Buffer, area: Rect, offset: u32) {
    let Some(y) = scanline_row(area, offset) else {
        return;
    };
    for x in area.left()..area.right() {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_bg(theme::SCANLINE);
        }
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::app::test_app;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn full_frame_renders_reference_set() {
        let (mut app, _rx, _tx) = test_app();
        app.tick(Duration::from_secs(2));
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("PUMPSIGNAL"));
        assert!(text.contains("3 HIGH SIGNALS"));
        assert!(text.contains("ACTIVE SIGNALS (6)"));
        assert!(text.contains("$PEPE2"));
        assert!(text.contains("HIGH BOND"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (app, _rx, _tx) = test_app();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let (mut app, _rx, _tx) = test_app();
        app.toggle_help();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("Keys"));
    }

    #[test]
    fn scanline_tracks_offset() {
        let area = Rect::new(0, 2, 80, 50);
        assert_eq!(scanline_row(area, 0), Some(2));
        assert_eq!(scanline_row(area, 50), Some(27));
        assert_eq!(scanline_row(area, 99), Some(51));
        assert_eq!(scanline_row(Rect::new(0, 0, 80, 0), 10), None);
    }
}
