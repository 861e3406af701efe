//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pumpsignal_core::FilterKind;

use crate::app::{AppState, Overlay};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub active_filter: FilterKind,
    pub help_dismissed: bool,
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        active_filter: app.active_filter(),
        help_dismissed: app.help_dismissed,
    }
}

/// First run opens the help overlay.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.dashboard.set_active_filter(state.active_filter);
    app.help_dismissed = state.help_dismissed;
    if !state.help_dismissed {
        app.overlay = Overlay::Help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;
    use crate::input::handle_key;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("pumpsignal_persist_test");
        let path = dir.join("state.json");

        let state = PersistedState {
            active_filter: FilterKind::Bundler,
            help_dismissed: true,
        };
        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.active_filter, FilterKind::Bundler);
        assert!(loaded.help_dismissed);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.active_filter, FilterKind::All);
        assert!(!loaded.help_dismissed);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("pumpsignal_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.active_filter, FilterKind::All);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn apply_restores_filter_and_shows_help_once() {
        let (mut app, _rx, _tx) = test_app();
        apply(
            &mut app,
            PersistedState {
                active_filter: FilterKind::Insider,
                help_dismissed: false,
            },
        );
        assert_eq!(app.active_filter(), FilterKind::Insider);
        assert_eq!(app.overlay, Overlay::Help);

        app.toggle_help();
        let extracted = extract(&app);
        assert!(extracted.help_dismissed);
        assert_eq!(extracted.active_filter, FilterKind::Insider);
    }

    #[test]
    fn quitting_with_help_open_keeps_it_dismissed() {
        let (mut app, _rx, _tx) = test_app();
        apply(
            &mut app,
            PersistedState {
                active_filter: FilterKind::All,
                help_dismissed: true,
            },
        );
        assert_eq!(app.overlay, Overlay::None);

        handle_key(&mut app, KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE));
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
        assert!(extract(&app).help_dismissed);
    }

    #[test]
    fn first_run_quit_before_closing_help_shows_it_again() {
        let (mut app, _rx, _tx) = test_app();
        apply(&mut app, PersistedState::default());
        assert_eq!(app.overlay, Overlay::Help);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!extract(&app).help_dismissed);
    }
}
