//! Configuration types for mincopy
//!
//! [`SyncConfig`] is built once at startup and shared read-only by every
//! component for the lifetime of the process.

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Include pattern used when none is given
pub const DEFAULT_INCLUDE: &str = "**/*";

/// Immutable synchronization configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Absolute path of the watched source tree
    pub source_root: PathBuf,
    /// Absolute path of the mirrored destination tree
    pub dest_root: PathBuf,
    /// Globs a relative path must match (at least one)
    pub include_patterns: Vec<String>,
    /// Globs a relative path must not match (none of them)
    pub exclude_patterns: Vec<String>,
    /// Log every individual write and delete
    pub debug: bool,
}

impl SyncConfig {
    /// Create a configuration mirroring everything from `source_root` to `dest_root`
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(source_root: P, dest_root: Q) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            include_patterns: vec![DEFAULT_INCLUDE.to_string()],
            exclude_patterns: Vec::new(),
            debug: false,
        }
    }

    /// Replace the include patterns
    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.include_patterns = patterns;
        self
    }

    /// Replace the exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Enable or disable per-file debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Absolute path of `file` under the source root
    pub fn source_path(&self, file: &Path) -> Result<PathBuf> {
        resolve(&self.source_root, file)
    }

    /// Absolute path of `file` under the destination root
    pub fn dest_path(&self, file: &Path) -> Result<PathBuf> {
        resolve(&self.dest_root, file)
    }
}

/// Join a relative path onto `root`, refusing anything that could leave it
fn resolve(root: &Path, file: &Path) -> Result<PathBuf> {
    if file.as_os_str().is_empty() {
        return Err(Error::sync("empty relative path"));
    }

    for component in file.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::sync(format!(
                    "'{}' is not a path inside the synchronized tree",
                    file.display()
                )));
            }
        }
    }

    Ok(root.join(file))
}
