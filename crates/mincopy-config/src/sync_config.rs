//! Building a [`SyncConfig`] from command line input

use crate::globs::{resolve_excludes, resolve_includes};
use crate::{ConfigError, ConfigResult};
use mincopy_types::SyncConfig;
use std::path::{Component, Path, PathBuf};

/// Builder turning raw command line arguments into a [`SyncConfig`]
#[derive(Debug, Clone)]
pub struct SyncConfigBuilder {
    source: PathBuf,
    dest: PathBuf,
    globs: Option<String>,
    excludes: Vec<String>,
    debug: bool,
    cwd: Option<PathBuf>,
}

impl SyncConfigBuilder {
    /// Start from a source and destination root, relative or absolute
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(source: P, dest: Q) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            globs: None,
            excludes: Vec::new(),
            debug: false,
            cwd: None,
        }
    }

    /// Raw include argument: one glob or a JSON array of globs
    pub fn globs(mut self, globs: Option<&str>) -> Self {
        self.globs = globs.map(str::to_string);
        self
    }

    /// Add one raw exclude argument
    pub fn exclude<S: Into<String>>(mut self, exclude: S) -> Self {
        self.excludes.push(exclude.into());
        self
    }

    /// Add several raw exclude arguments
    pub fn excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(excludes.into_iter().map(Into::into));
        self
    }

    /// Log every individual write and delete
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Resolve relative roots against `cwd` instead of the process directory
    pub fn cwd<P: Into<PathBuf>>(mut self, cwd: P) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Resolve the roots and parse the globs
    pub fn build(self) -> ConfigResult<SyncConfig> {
        let cwd = match self.cwd {
            Some(cwd) => cwd,
            None => std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };

        let source_root = absolute(&cwd, &self.source);
        let dest_root = absolute(&cwd, &self.dest);

        if !source_root.is_dir() {
            return Err(ConfigError::validation(format!(
                "Source '{}' is not a directory",
                source_root.display()
            )));
        }

        if dest_root.starts_with(&source_root) || source_root.starts_with(&dest_root) {
            return Err(ConfigError::validation(format!(
                "Source '{}' and destination '{}' must not contain each other",
                source_root.display(),
                dest_root.display()
            )));
        }

        Ok(SyncConfig::new(source_root, dest_root)
            .with_include_patterns(resolve_includes(self.globs.as_deref()))
            .with_exclude_patterns(resolve_excludes(self.excludes.as_slice()))
            .with_debug(self.debug))
    }
}

/// Absolute form of `path` with `.` and `..` folded away lexically
fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
