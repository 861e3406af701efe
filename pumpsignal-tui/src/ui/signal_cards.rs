//! Signals section — header with count, filter tabs and the card list.
//!
//! Cards appear one at a time after a set replacement or filter switch.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use pumpsignal_core::domain::Signal;

use crate::app::AppState;
use crate::theme;
use crate::ui::filter_tabs;

const CARD_HEIGHT: u16 = 5;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let dashboard = &app.dashboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" ACTIVE SIGNALS ({}) ", dashboard.filtered_len()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    filter_tabs::render(f, chunks[0], dashboard.active_filter());

    let cards = dashboard.filtered();
    if cards.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "  No signals match this filter.",
            theme::muted(),
        ));
        f.render_widget(empty, chunks[2]);
        return;
    }

    let revealed = dashboard.visible_card_count();
    let fit = usize::from(chunks[2].height / CARD_HEIGHT);
    let now = Utc::now();
    let shown: Vec<&Signal> = cards
        .into_iter()
        .take(revealed)
        .skip(app.card_scroll)
        .take(fit)
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); shown.len()])
        .split(chunks[2]);
    for (signal, row) in shown.into_iter().zip(rows.iter()) {
        render_card(f, *row, signal, now);
    }
}

fn render_card(f: &mut Frame, area: Rect, signal: &Signal, now: chrono::DateTime<Utc>) {
    let bucket = signal.score_bucket();
    let bond = signal.bond_style();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(bond.emphasized))
        .title(Line::from(vec![
            Span::styled(format!(" {} ", signal.ticker), theme::accent_bold()),
            Span::styled(format!("{} ", signal.token_address), theme::muted()),
        ]))
        .title(
            Line::from(vec![
                Span::styled(" SCORE ", theme::muted()),
                Span::styled(format!("{} ", signal.score), theme::score_style(bucket)),
            ])
            .right_aligned(),
        );

    let yes_no = |flag: bool| if flag { "YES" } else { "NO" };
    let lines = vec![
        Line::from(vec![
            Span::styled(signal.narrative.as_str(), theme::text()),
            Span::styled("  •  ", theme::muted()),
            Span::styled(signal.elapsed_label(now), theme::muted()),
        ]),
        Line::from(vec![
            Span::styled("insider ", theme::muted()),
            Span::styled(signal.insider_buys.to_string(), theme::accent()),
            Span::styled("  wallets ", theme::muted()),
            Span::styled(signal.profitable_wallets.to_string(), theme::accent()),
            Span::styled("  dev bond ", theme::muted()),
            Span::styled(format!("{}%", signal.dev_bond_rate), theme::accent()),
            Span::styled("  bundler ", theme::muted()),
            Span::styled(yes_no(signal.bundler_activity), theme::accent()),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} BOND", signal.bond_potential.label()),
                theme::bond_style(bond),
            ),
            Span::styled("  ", theme::muted()),
            Span::styled(
                signal.price_change_text(),
                theme::price_change(signal.price_change_percent),
            ),
            Span::styled("  mcap ", theme::muted()),
            Span::styled(signal.market_cap_display.as_str(), theme::text()),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
