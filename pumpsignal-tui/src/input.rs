//! Keyboard input dispatch — overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use pumpsignal_core::FilterKind;

use crate::app::{AppState, Overlay};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    if app.overlay == Overlay::Help {
        if matches!(key.code, KeyCode::Char('q')) {
            app.running = false;
        }
        app.close_help();
        return;
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.set_filter(FilterKind::from_index(index));
        }
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.set_filter(app.active_filter().prev());
        }
        KeyCode::Tab => app.set_filter(app.active_filter().next()),
        KeyCode::BackTab => app.set_filter(app.active_filter().prev()),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('r') => app.request_reload(),
        _ => {}
    }
}
