//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The feed worker communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use pumpsignal_core::{Dashboard, FilterKind, Signal};

use crate::worker::{FeedCommand, FeedResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// A feed failure kept for the help overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

const ERROR_HISTORY_CAP: usize = 50;

/// Top-level application state.
pub struct AppState {
    pub dashboard: Dashboard,
    pub running: bool,
    pub overlay: Overlay,
    /// Set once the user has closed the help overlay; persisted.
    pub help_dismissed: bool,
    /// First card row shown in the signals section.
    pub card_scroll: usize,

    // Feed
    pub feed_name: String,
    pub last_refresh: Option<DateTime<Utc>>,
    pub reload_pending: bool,
    pub worker_tx: Sender<FeedCommand>,
    pub worker_rx: Receiver<FeedResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
}

impl AppState {
    pub fn new(
        dashboard: Dashboard,
        feed_name: String,
        worker_tx: Sender<FeedCommand>,
        worker_rx: Receiver<FeedResponse>,
    ) -> Self {
        Self {
            dashboard,
            running: true,
            overlay: Overlay::None,
            help_dismissed: false,
            card_scroll: 0,
            feed_name,
            last_refresh: None,
            reload_pending: true,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
        }
    }

    pub fn active_filter(&self) -> FilterKind {
        self.dashboard.active_filter()
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        if filter != self.dashboard.active_filter() {
            self.dashboard.set_active_filter(filter);
            self.card_scroll = 0;
            self.set_status(format!(
                "Filter: {} ({} signals)",
                filter.label(),
                self.dashboard.filtered_len()
            ));
        }
    }

    pub fn scroll_down(&mut self) {
        let last = self.dashboard.filtered_len().saturating_sub(1);
        self.card_scroll = (self.card_scroll + 1).min(last);
    }

    pub fn scroll_up(&mut self) {
        self.card_scroll = self.card_scroll.saturating_sub(1);
    }

    pub fn toggle_help(&mut self) {
        match self.overlay {
            Overlay::Help => self.close_help(),
            Overlay::None => self.overlay = Overlay::Help,
        }
    }

    pub fn close_help(&mut self) {
        self.overlay = Overlay::None;
        self.help_dismissed = true;
    }

    /// Ask the worker for a fresh set.
    pub fn request_reload(&mut self) {
        if self.worker_tx.send(FeedCommand::Reload).is_ok() {
            self.reload_pending = true;
            self.set_status(format!("Reloading {}...", self.feed_name));
        } else {
            self.set_error("feed worker is not running");
        }
    }

    /// Feed elapsed wall time into the animation clock.
    pub fn tick(&mut self, dt: Duration) {
        self.dashboard.advance(dt);
    }

    pub fn handle_feed_response(&mut self, response: FeedResponse) {
        self.reload_pending = false;
        match response {
            FeedResponse::Signals { source, signals } => self.apply_signals(source, signals),
            FeedResponse::Error { source, message } => {
                warn!(%source, %message, "feed error");
                self.push_error(source, message);
            }
        }
    }

    fn apply_signals(&mut self, source: String, signals: Vec<Signal>) {
        let report = self.dashboard.replace_signals(signals);
        self.card_scroll = self
            .card_scroll
            .min(self.dashboard.filtered_len().saturating_sub(1));
        self.last_refresh = Some(Utc::now());
        info!(%source, accepted = report.accepted, "dashboard refreshed");
        if report.duplicates_dropped > 0 {
            self.set_warning(format!(
                "{}: {} signals, {} duplicate ids dropped",
                source, report.accepted, report.duplicates_dropped
            ));
        } else {
            self.set_status(format!("{}: {} signals", source, report.accepted));
        }
        self.feed_name = source;
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, source: String, message: String) {
        self.error_history.push_front(ErrorRecord {
            timestamp: Utc::now(),
            source,
            message: message.clone(),
        });
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Error));
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> (AppState, Receiver<FeedCommand>, Sender<FeedResponse>) {
    use pumpsignal_core::feed::reference_signals;
    use pumpsignal_core::DashboardConfig;
    use std::sync::mpsc;

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let dashboard =
        Dashboard::with_signals(DashboardConfig::default(), reference_signals(Utc::now()));
    let app = AppState::new(dashboard, "mock".into(), cmd_tx, resp_rx);
    (app, cmd_rx, resp_tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpsignal_core::feed::reference_signals;

    #[test]
    fn filter_change_resets_scroll() {
        let (mut app, _rx, _tx) = test_app();
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.card_scroll, 2);
        app.set_filter(FilterKind::HighBond);
        assert_eq!(app.card_scroll, 0);
        assert_eq!(app.dashboard.filtered_len(), 3);
    }

    #[test]
    fn scroll_is_bounded() {
        let (mut app, _rx, _tx) = test_app();
        for _ in 0..20 {
            app.scroll_down();
        }
        assert_eq!(app.card_scroll, 5);
        for _ in 0..20 {
            app.scroll_up();
        }
        assert_eq!(app.card_scroll, 0);
    }

    #[test]
    fn reload_sends_command() {
        let (mut app, rx, _tx) = test_app();
        app.request_reload();
        assert_eq!(rx.try_recv().unwrap(), FeedCommand::Reload);
        assert!(app.reload_pending);
    }

    #[test]
    fn reload_without_worker_is_an_error() {
        let (mut app, rx, _tx) = test_app();
        drop(rx);
        app.request_reload();
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn feed_signals_replace_dashboard_set() {
        let (mut app, _rx, _tx) = test_app();
        let mut signals = reference_signals(Utc::now());
        signals.truncate(2);
        app.handle_feed_response(FeedResponse::Signals {
            source: "signals.json".into(),
            signals,
        });
        assert_eq!(app.dashboard.signals().len(), 2);
        assert_eq!(app.feed_name, "signals.json");
        assert!(app.last_refresh.is_some());
        assert!(!app.reload_pending);
    }

    #[test]
    fn feed_errors_are_capped() {
        let (mut app, _rx, _tx) = test_app();
        for i in 0..60 {
            app.handle_feed_response(FeedResponse::Error {
                source: "file".into(),
                message: format!("boom {i}"),
            });
        }
        assert_eq!(app.error_history.len(), 50);
        assert_eq!(app.error_history[0].message, "boom 59");
        assert_eq!(app.dashboard.signals().len(), 6);
    }
}
