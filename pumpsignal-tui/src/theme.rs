//! Neon terminal theme for the PumpSignal dashboard.
//!
//! # Color Palette
//! - **Background**: Near-black (base layer)
//! - **Positive**: Neon green (HIGH bond potential, top scores, gains)
//! - **Accent**: Electric cyan (focus, good scores, radar rings)
//! - **Caution**: Neon yellow (MEDIUM potential, fair scores)
//! - **Alert**: Neon orange (LOW potential, weak scores, insider alerts)
//! - **Negative**: Hot pink (price drops, errors)
//! - **Muted**: Steel gray (secondary text, grid lines)

use ratatui::style::{Color, Modifier, Style};

use pumpsignal_core::domain::{BondStyle, ScoreBucket, Tone};

pub const BACKGROUND: Color = Color::Rgb(10, 10, 12);
pub const POSITIVE: Color = Color::Rgb(0, 255, 136);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const CAUTION: Color = Color::Rgb(255, 255, 0);
pub const ALERT: Color = Color::Rgb(255, 102, 0);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const MUTED: Color = Color::Rgb(110, 118, 129);
pub const GRID: Color = Color::Rgb(0, 90, 60);
pub const SCANLINE: Color = Color::Rgb(0, 40, 28);
pub const TEXT: Color = Color::White;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => POSITIVE,
        Tone::Accent => ACCENT,
        Tone::Caution => CAUTION,
        Tone::Alert => ALERT,
    }
}

pub fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

pub fn score_style(bucket: ScoreBucket) -> Style {
    Style::default()
        .fg(rgb(bucket.rgb()))
        .add_modifier(Modifier::BOLD)
}

/// Badge style; emphasized ratings are bold.
pub fn bond_style(style: BondStyle) -> Style {
    let base = Style::default().fg(rgb(style.rgb));
    if style.emphasized {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

pub fn price_change(value: f64) -> Style {
    if value > 0.0 {
        Style::default().fg(POSITIVE)
    } else {
        Style::default().fg(NEGATIVE)
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn positive_bold() -> Style {
    positive().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(CAUTION)
}

pub fn alert() -> Style {
    Style::default().fg(ALERT)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(POSITIVE)
    } else {
        Style::default().fg(GRID)
    }
}

pub fn panel_title(active: bool) -> Style {
    panel_border(active).add_modifier(Modifier::BOLD)
}

/// Filter tab: the active one is inverted.
pub fn tab(active: bool) -> Style {
    if active {
        Style::default()
            .fg(BACKGROUND)
            .bg(POSITIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpsignal_core::domain::BondPotential;

    #[test]
    fn tones_map_to_palette() {
        assert_eq!(tone_color(Tone::Positive), POSITIVE);
        assert_eq!(tone_color(Tone::Accent), ACCENT);
        assert_eq!(tone_color(Tone::Caution), CAUTION);
        assert_eq!(tone_color(Tone::Alert), ALERT);
    }

    #[test]
    fn bucket_colors_match_tones() {
        for bucket in [
            ScoreBucket::Excellent,
            ScoreBucket::Good,
            ScoreBucket::Fair,
            ScoreBucket::Weak,
        ] {
            assert_eq!(rgb(bucket.rgb()), tone_color(bucket.tone()));
        }
    }

    #[test]
    fn high_bond_badge_is_bold() {
        let high = bond_style(BondPotential::High.style());
        assert!(high.add_modifier.contains(Modifier::BOLD));
        assert_eq!(high.fg, Some(POSITIVE));
        let low = bond_style(BondPotential::Low.style());
        assert!(!low.add_modifier.contains(Modifier::BOLD));
        assert_eq!(low.fg, Some(ALERT));
    }

    #[test]
    fn price_change_direction() {
        assert_eq!(price_change(12.0).fg, Some(POSITIVE));
        assert_eq!(price_change(-3.0).fg, Some(NEGATIVE));
        assert_eq!(price_change(0.0).fg, Some(NEGATIVE));
    }

    #[test]
    fn active_tab_is_inverted() {
        assert_eq!(tab(true).bg, Some(POSITIVE));
        assert_eq!(tab(false).bg, None);
    }
}
