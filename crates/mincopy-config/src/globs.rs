//! Glob list parsing
//!
//! A glob argument is either a single pattern or, when it starts with `[`,
//! a JSON array of patterns. A JSON-looking argument that fails to parse is
//! kept as a single literal pattern.

use mincopy_types::{Error, Result, DEFAULT_INCLUDE};
use tracing::warn;

/// Parse one glob argument into its patterns
pub fn parse_glob_list(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed)
            .map_err(|e| Error::malformed(raw, e.to_string()));
    }

    Ok(vec![raw.to_string()])
}

/// Patterns from `raw`, falling back to the literal string when it is malformed
fn parse_or_literal(raw: &str) -> Vec<String> {
    parse_glob_list(raw).unwrap_or_else(|e| {
        warn!("{}; using it as a single pattern", e);
        vec![raw.to_string()]
    })
}

/// Include patterns from an optional argument, defaulting to everything
pub fn resolve_includes(raw: Option<&str>) -> Vec<String> {
    let patterns = raw.map(parse_or_literal).unwrap_or_default();
    if patterns.is_empty() {
        vec![DEFAULT_INCLUDE.to_string()]
    } else {
        patterns
    }
}

/// Exclude patterns from zero or more arguments
pub fn resolve_excludes<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| parse_or_literal(arg.as_ref()))
        .collect()
}
