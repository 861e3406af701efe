//! Help overlay — key bindings and recent feed errors.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

const RECENT_ERRORS: usize = 5;

pub fn render_help(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" PumpSignal ")
        .title_style(theme::accent_bold());

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), theme::positive_bold()),
            Span::styled(what, theme::muted()),
        ])
    };

    let mut text = vec![
        Line::from(Span::styled("Keys", theme::accent_bold())),
        key("1 2 3 4", "ALL / INSIDER / BUNDLER / HIGH BOND"),
        key("Tab S-Tab", "cycle filters"),
        key("j k", "scroll signal cards"),
        key("r", "reload the feed"),
        key("?", "toggle this help"),
        key("q Esc C-c", "quit"),
        Line::from(""),
    ];

    if app.error_history.is_empty() {
        text.push(Line::from(Span::styled("No feed errors.", theme::muted())));
    } else {
        text.push(Line::from(Span::styled(
            format!("Feed errors ({})", app.error_history.len()),
            theme::negative(),
        )));
        for record in app.error_history.iter().take(RECENT_ERRORS) {
            text.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", record.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("{}: ", record.source), theme::alert()),
                Span::styled(record.message.as_str(), theme::text()),
            ]));
        }
    }

    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press any key to dismiss...",
        theme::muted(),
    )));

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
