//! Background feed worker — fetches signal sets off the render thread.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Every fetch
//! ships a whole set; the main thread swaps it in wholesale.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use pumpsignal_core::{Signal, SignalSource};

/// Commands sent from the TUI to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Reload,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum FeedResponse {
    Signals { source: String, signals: Vec<Signal> },
    Error { source: String, message: String },
}

/// Spawn the feed worker. It fetches once immediately, then on every
/// `Reload` and, when `refresh` is set, on that interval.
pub fn spawn_worker(
    source: Box<dyn SignalSource>,
    refresh: Option<Duration>,
    rx: Receiver<FeedCommand>,
    tx: Sender<FeedResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("pumpsignal-feed".into())
        .spawn(move || worker_loop(source, refresh, rx, tx))
}

fn worker_loop(
    mut source: Box<dyn SignalSource>,
    refresh: Option<Duration>,
    rx: Receiver<FeedCommand>,
    tx: Sender<FeedResponse>,
) {
    info!(source = source.name(), ?refresh, "feed worker started");
    if !fetch_and_send(source.as_mut(), &tx) {
        return;
    }

    loop {
        let command = match refresh {
            Some(interval) => match rx.recv_timeout(interval) {
                Ok(cmd) => cmd,
                Err(RecvTimeoutError::Timeout) => FeedCommand::Reload,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(cmd) => cmd,
                Err(_) => break,
            },
        };
        match command {
            FeedCommand::Shutdown => break,
            FeedCommand::Reload => {
                if !fetch_and_send(source.as_mut(), &tx) {
                    break;
                }
            }
        }
    }
    info!("feed worker stopped");
}

/// Returns false once the receiving side is gone.
fn fetch_and_send(source: &mut dyn SignalSource, tx: &Sender<FeedResponse>) -> bool {
    let name = source.name().to_string();
    let response = match source.fetch() {
        Ok(signals) => {
            debug!(source = %name, count = signals.len(), "feed fetched");
            FeedResponse::Signals { source: name, signals }
        }
        Err(err) => {
            warn!(source = %name, error = %err, "feed fetch failed");
            FeedResponse::Error {
                source: name,
                message: err.to_string(),
            }
        }
    };
    tx.send(response).is_ok()
}
