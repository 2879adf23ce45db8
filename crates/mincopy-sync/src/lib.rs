//! Change detection and write minimization for mincopy
//!
//! This crate is the core of mincopy. Given filesystem events relative to a
//! source root, it mirrors them into a destination root while writing a
//! destination file only when its bytes actually differ:
//!
//! - **Content Cache**: bounded LRU map with TTL expiry from destination path to bytes
//! - **Destination Reader**: cache-first reads of destination files
//! - **Sync Engine**: upsert/remove with the minimal filesystem mutation
//! - **Event Router**: per-event error isolation over a stream of watch events
//! - **Activity Reporter**: periodic summary of writes and deletes
//!
//! # Examples
//!
//! ```rust,no_run
//! use mincopy_sync::{ActivityReporter, EventRouter, SyncEngine, DEFAULT_REPORT_INTERVAL};
//! use mincopy_types::{SyncConfig, WatchEvent};
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # async fn example() {
//! let config = Arc::new(SyncConfig::new("/abs/source", "/abs/dest"));
//! let engine = SyncEngine::new(config);
//! tokio::spawn(ActivityReporter::new(engine.counters(), DEFAULT_REPORT_INTERVAL).run());
//!
//! let (tx, rx) = mpsc::unbounded_channel();
//! tx.send(WatchEvent::add("notes/today.md")).unwrap();
//! drop(tx);
//! EventRouter::new(engine).run(rx).await;
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod engine;
pub mod fs;
pub mod reader;
pub mod reporter;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheEntry, CacheLimits, CacheStats, ContentCache};
pub use engine::SyncEngine;
pub use fs::LocalFileSystem;
pub use reader::DestinationReader;
pub use reporter::{ActivityReporter, DEFAULT_REPORT_INTERVAL};
pub use router::{EventRouter, RouterStats};
