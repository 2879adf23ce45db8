//! Core data types for mincopy
//!
//! Watch events flowing into the sync core, the outcome of each engine
//! operation, and the activity counters drained by the reporter.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Kind of change reported by the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A file appeared in the source tree
    Add,
    /// A file's content may have changed
    Change,
    /// A file disappeared from the source tree
    Unlink,
}

impl EventKind {
    /// Name used in log lines
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Change => "change",
            Self::Unlink => "unlink",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filesystem change, relative to the source root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchEvent {
    /// What happened
    pub kind: EventKind,
    /// Path relative to both roots
    pub path: PathBuf,
}

impl WatchEvent {
    /// Create a new event
    pub fn new<P: Into<PathBuf>>(kind: EventKind, path: P) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// Shorthand for an `add` event
    pub fn add<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(EventKind::Add, path)
    }

    /// Shorthand for a `change` event
    pub fn change<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(EventKind::Change, path)
    }

    /// Shorthand for an `unlink` event
    pub fn unlink<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(EventKind::Unlink, path)
    }
}

/// What an engine operation ended up doing to the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Source bytes were written to the destination
    Written,
    /// Destination already held identical bytes
    Unchanged,
    /// Destination file was deleted
    Deleted,
    /// Nothing to delete
    AlreadyAbsent,
}

impl SyncOutcome {
    /// Whether the destination tree was modified
    pub fn is_effectful(self) -> bool {
        matches!(self, Self::Written | Self::Deleted)
    }
}

/// Writes and deletes performed since the last drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
    /// Files written
    pub writes: u64,
    /// Files deleted
    pub deletes: u64,
}

impl ActivitySnapshot {
    /// True when nothing happened
    pub fn is_idle(&self) -> bool {
        self.writes == 0 && self.deletes == 0
    }
}

impl fmt::Display for ActivitySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files written, {} files unlinked",
            self.writes, self.deletes
        )
    }
}

/// Shared handle to the write/delete counters
///
/// The engine increments, the reporter drains. Clones observe the same
/// counters.
#[derive(Debug, Clone, Default)]
pub struct ActivityCounters {
    writes: Arc<AtomicU64>,
    deletes: Arc<AtomicU64>,
}

impl ActivityCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one write
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one delete
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the counters without resetting them
    pub fn snapshot(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            writes: self.writes.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }

    /// Read and reset both counters to zero
    pub fn take(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            writes: self.writes.swap(0, Ordering::Relaxed),
            deletes: self.deletes.swap(0, Ordering::Relaxed),
        }
    }
}
