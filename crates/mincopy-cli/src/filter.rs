//! Include/exclude matching of relative paths

use glob::{MatchOptions, Pattern};
use mincopy_types::DEFAULT_INCLUDE;
use std::path::{Component, Path};
use tracing::warn;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which source-relative paths are mirrored
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    /// Compile include and exclude globs
    ///
    /// Invalid globs are logged and skipped. If no include glob survives,
    /// everything is included.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Self {
        let mut include = compile(include);
        if include.is_empty() {
            include = compile(&[DEFAULT_INCLUDE]);
        }

        Self {
            include,
            exclude: compile(exclude),
        }
    }

    /// Whether `path`, relative to the source root, should be mirrored
    pub fn matches(&self, path: &Path) -> bool {
        let candidate = slash_path(path);
        self.include
            .iter()
            .any(|p| p.matches_with(&candidate, MATCH_OPTIONS))
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_with(&candidate, MATCH_OPTIONS))
    }
}

fn compile<S: AsRef<str>>(globs: &[S]) -> Vec<Pattern> {
    globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob.as_ref()) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Ignoring invalid glob '{}': {}", glob.as_ref(), e);
                None
            }
        })
        .collect()
}

/// `/`-separated form of a relative path on every platform
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
