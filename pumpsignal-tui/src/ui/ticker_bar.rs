//! Scrolling ticker strip.
//!
//! Strip positions are in layout units; one terminal cell covers
//! `UNITS_PER_CELL` of them.

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use pumpsignal_core::domain::Signal;
use pumpsignal_core::ticker::{self, TickerStrip};

use crate::app::AppState;
use crate::theme;

pub const UNITS_PER_CELL: i64 = 7;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(theme::panel_border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }
    render_strip(f.buffer_mut(), inner, &app.dashboard.ticker());
}

/// Styled pieces of one ticker item.
fn segments(signal: &Signal) -> Vec<(String, Style)> {
    let parts = ticker::item_parts(signal);
    vec![
        (format!("{} ", parts.ticker), theme::text()),
        (parts.change, theme::price_change(signal.price_change_percent)),
        (format!("  {}", parts.market_cap), theme::muted()),
        ("  SCORE: ".to_string(), theme::muted()),
        (parts.score.to_string(), theme::score_style(signal.score_bucket())),
    ]
}

pub fn render_strip(buf: &mut Buffer, area: Rect, strip: &TickerStrip<'_>) {
    let width_units = u32::from(area.width) * UNITS_PER_CELL as u32;
    for item in strip.visible(width_units) {
        let mut col = item.x.div_euclid(UNITS_PER_CELL);
        for (text, style) in segments(item.signal) {
            for ch in text.chars() {
                if col >= i64::from(area.width) {
                    break;
                }
                if col >= 0 {
                    let x = area.x + col as u16;
                    if let Some(cell) = buf.cell_mut((x, area.y)) {
                        cell.set_char(ch).set_style(style);
                    }
                }
                col += 1;
            }
        }
    }
}
