//! Dispatch of watcher events to the sync engine
//!
//! `add` and `change` become an upsert, `unlink` becomes a remove. A failure
//! is logged with the file and the event kind and then dropped: the stream
//! of events must keep flowing no matter how many individual files fail.

use crate::engine::SyncEngine;
use crate::fs::LocalFileSystem;
use mincopy_types::{EventKind, FileSystem, SyncOutcome, WatchEvent};
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Totals over the lifetime of a router
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    /// Events handed to the engine
    pub dispatched: u64,
    /// Events whose operation failed
    pub failed: u64,
}

/// Routes [`WatchEvent`]s to a [`SyncEngine`] one at a time
#[derive(Debug)]
pub struct EventRouter<F = LocalFileSystem> {
    engine: SyncEngine<F>,
    stats: RouterStats,
}

impl<F: FileSystem> EventRouter<F> {
    /// Create a router driving `engine`
    pub fn new(engine: SyncEngine<F>) -> Self {
        Self {
            engine,
            stats: RouterStats::default(),
        }
    }

    /// Handle one event, returning `None` if its operation failed
    pub async fn dispatch(&mut self, event: &WatchEvent) -> Option<SyncOutcome> {
        self.stats.dispatched += 1;

        let result = match event.kind {
            EventKind::Add | EventKind::Change => self.engine.upsert(&event.path).await,
            EventKind::Unlink => self.engine.remove(&event.path).await,
        };

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                self.stats.failed += 1;
                error!(
                    file = %event.path.display(),
                    event = %event.kind,
                    severity = ?e.severity(),
                    recoverable = e.is_recoverable(),
                    "Error in hook: {}",
                    e
                );
                None
            }
        }
    }

    /// Process events until every sender is dropped
    ///
    /// Events are handled strictly in arrival order and never overlap, so two
    /// operations on the same path cannot interleave.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<WatchEvent>) -> Self {
        while let Some(event) = events.recv().await {
            self.dispatch(&event).await;
        }

        debug!(
            "Event stream closed after {} events ({} failed)",
            self.stats.dispatched, self.stats.failed
        );
        self
    }

    /// Lifetime totals
    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// The engine being driven
    pub fn engine(&mut self) -> &mut SyncEngine<F> {
        &mut self.engine
    }

    /// Release the engine
    pub fn into_engine(self) -> SyncEngine<F> {
        self.engine
    }
}
