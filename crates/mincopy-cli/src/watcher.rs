//! Translating filesystem notifications into [`WatchEvent`]s
//!
//! Paths are reported relative to the watched root. Directories are never
//! events themselves: a directory that appears is expanded into one `add`
//! per file below it, and a directory that vanishes into one `unlink` per
//! file mirrored below it.

use crate::filter::PathFilter;
use mincopy_types::WatchEvent;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use walkdir::WalkDir;

/// The watched source root and the destination it is mirrored into
#[derive(Debug, Clone)]
pub struct Roots {
    /// Canonical source root, as reported in notifications
    pub source: PathBuf,
    /// Destination root
    pub dest: PathBuf,
}

/// Start watching the source root recursively, sending matching events to `tx`
///
/// The returned watcher stops when dropped.
pub fn watch(
    roots: Roots,
    filter: Arc<PathFilter>,
    tx: UnboundedSender<WatchEvent>,
) -> notify::Result<RecommendedWatcher> {
    let watched = roots.source.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for change in translate(&event, &roots) {
                    if filter.matches(&change.path) && tx.send(change).is_err() {
                        return;
                    }
                }
            }
            Err(e) => warn!("Watch error: {}", e),
        },
        Config::default(),
    )?;

    watcher.watch(&watched, RecursiveMode::Recursive)?;
    Ok(watcher)
}

/// One `add` event per matching file already present under `root`
pub fn initial_scan(root: &Path, filter: &PathFilter) -> Vec<WatchEvent> {
    files_under(root, root)
        .into_iter()
        .filter(|path| filter.matches(path))
        .map(WatchEvent::add)
        .collect()
}

/// Map a notification to zero or more events relative to the source root
pub fn translate(event: &Event, roots: &Roots) -> Vec<WatchEvent> {
    use notify::EventKind as Kind;

    match &event.kind {
        Kind::Create(_) => event
            .paths
            .iter()
            .flat_map(|path| appeared(path, roots))
            .collect(),
        Kind::Modify(ModifyKind::Name(mode)) => renamed(*mode, &event.paths, roots),
        Kind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        Kind::Modify(_) => event
            .paths
            .iter()
            .filter(|path| !path.is_dir())
            .filter_map(|path| relative(path, &roots.source))
            .map(WatchEvent::change)
            .collect(),
        Kind::Remove(_) => disappeared(&event.paths, roots),
        Kind::Access(_) | Kind::Any | Kind::Other => Vec::new(),
    }
}

fn renamed(mode: RenameMode, paths: &[PathBuf], roots: &Roots) -> Vec<WatchEvent> {
    match mode {
        RenameMode::From => disappeared(paths, roots),
        RenameMode::To => paths.iter().flat_map(|path| appeared(path, roots)).collect(),
        RenameMode::Both => {
            let mut events = disappeared(&paths[..paths.len().min(1)], roots);
            if let Some(to) = paths.get(1) {
                events.extend(appeared(to, roots));
            }
            events
        }
        // Only one side known: decide by what is on disk now
        RenameMode::Any | RenameMode::Other => paths
            .iter()
            .flat_map(|path| {
                if path.exists() {
                    appeared(path, roots)
                } else {
                    disappeared(std::slice::from_ref(path), roots)
                }
            })
            .collect(),
    }
}

fn appeared(path: &Path, roots: &Roots) -> Vec<WatchEvent> {
    if path.is_dir() {
        files_under(path, &roots.source)
            .into_iter()
            .map(WatchEvent::add)
            .collect()
    } else {
        relative(path, &roots.source)
            .map(WatchEvent::add)
            .into_iter()
            .collect()
    }
}

/// The source side is gone, so a vanished directory is recognized on the mirror
fn disappeared(paths: &[PathBuf], roots: &Roots) -> Vec<WatchEvent> {
    paths
        .iter()
        .filter_map(|path| relative(path, &roots.source))
        .flat_map(|rel| {
            let mirrored = roots.dest.join(&rel);
            if mirrored.is_dir() {
                files_under(&mirrored, &roots.dest)
            } else {
                vec![rel]
            }
        })
        .map(WatchEvent::unlink)
        .collect()
}

/// Files below `dir`, relative to `root`
fn files_under(dir: &Path, root: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| relative(entry.path(), root))
        .collect()
}

fn relative(path: &Path, root: &Path) -> Option<PathBuf> {
    path.strip_prefix(root)
        .ok()
        .filter(|rel| !rel.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
