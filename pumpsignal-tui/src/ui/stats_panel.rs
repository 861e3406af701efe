//! Sidebar — eased headline stats, trending narratives, top devs and the
//! insider alert.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph, Wrap};

use pumpsignal_core::domain::ScoreBucket;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let alert_height = if app.dashboard.alert().is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(alert_height),
            Constraint::Min(0),
        ])
        .split(area);

    render_stats(f, chunks[0], app);
    render_narratives(f, chunks[1], app);
    render_devs(f, chunks[2], app);
    if alert_height > 0 {
        render_alert(f, chunks[3], app);
    }
}

fn section(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {title} "))
        .title_style(theme::panel_title(true))
}

fn stat_line(label: &str, value: String) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), theme::muted()),
        Span::styled(value, theme::positive_bold()),
    ])
}

fn render_stats(f: &mut Frame, area: Rect, app: &AppState) {
    let shown = app.dashboard.displayed_stats();
    let lines = vec![
        stat_line("TOTAL SIGNALS", shown.total_count.to_string()),
        stat_line("HIGH POTENTIAL", shown.high_potential_count.to_string()),
        stat_line("AVG SCORE", shown.average_score.to_string()),
        stat_line("NARRATIVES", shown.active_narratives.to_string()),
    ];
    f.render_widget(Paragraph::new(lines).block(section("STATS")), area);
}

fn render_narratives(f: &mut Frame, area: Rect, app: &AppState) {
    let block = section("TRENDING");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let narratives = app.dashboard.trending_narratives();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); narratives.len()])
        .split(inner);

    for (narrative, row) in narratives.iter().zip(rows.iter()) {
        let color = theme::rgb(ScoreBucket::from_score(narrative.heat).rgb());
        let gauge = LineGauge::default()
            .ratio(f64::from(narrative.heat.min(100)) / 100.0)
            .label(Span::styled(
                format!("{:<14.14}", narrative.name),
                theme::text(),
            ))
            .filled_style(Style::default().fg(color))
            .unfilled_style(theme::muted());
        f.render_widget(gauge, *row);
    }
}

fn render_devs(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = app
        .dashboard
        .top_devs()
        .into_iter()
        .map(|dev| {
            Line::from(vec![
                Span::styled(format!("{:<16}", dev.token_address), theme::muted()),
                Span::styled(format!("{:>3}% ", dev.dev_bond_rate), theme::positive_bold()),
                Span::styled(format!("{} buys", dev.insider_buys), theme::accent()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(section("TOP DEVS")), area);
}

fn render_alert(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(alert) = app.dashboard.alert() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::alert())
        .title(" ⚠ INSIDER ALERT ")
        .title_style(theme::alert());
    let text = Paragraph::new(Span::styled(alert.message, theme::text()))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(text, area);
}
