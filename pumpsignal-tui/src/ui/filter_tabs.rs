//! Filter selector tabs.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Tabs;

use pumpsignal_core::FilterKind;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect, active: FilterKind) {
    let titles: Vec<Line> = FilterKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!("{} {} {}", i + 1, kind.icon(), kind.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(theme::tab(false))
        .highlight_style(theme::tab(true))
        .divider("│");
    f.render_widget(tabs, area);
}
