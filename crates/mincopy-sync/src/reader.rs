//! Cache-backed reads of destination files
//!
//! This is the only path through which the engine looks at existing
//! destination content. Every cache mutation also goes through here: `read`
//! fills the cache on a miss, `record` stores what the engine just wrote and
//! `forget` drops what the engine just deleted. As long as nothing else
//! touches the cache, an entry always matches what this process last saw on
//! disk.

use crate::cache::{CacheLimits, ContentCache};
use bytes::Bytes;
use mincopy_types::{FileSystem, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

/// Reads destination files through a [`ContentCache`]
#[derive(Debug)]
pub struct DestinationReader<F> {
    fs: Arc<F>,
    cache: ContentCache,
}

impl<F: FileSystem> DestinationReader<F> {
    /// Create a reader with an empty cache
    pub fn new(fs: Arc<F>, limits: CacheLimits) -> Self {
        Self {
            fs,
            cache: ContentCache::new(limits),
        }
    }

    /// Return the content of `path`, from the cache when possible
    pub async fn read(&mut self, path: &Path) -> Result<Bytes> {
        if let Some(content) = self.cache.get(path) {
            return Ok(content);
        }

        trace!("Reading destination from disk: {}", path.display());
        let content = self.fs.read(path).await?;
        self.cache.set(path.to_path_buf(), content.clone());
        Ok(content)
    }

    /// Remember bytes just written to `path`
    pub fn record(&mut self, path: &Path, content: Bytes) {
        self.cache.set(path.to_path_buf(), content);
    }

    /// Forget `path` after it was deleted
    pub fn forget(&mut self, path: &Path) {
        self.cache.remove(path);
    }

    /// The underlying cache
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }
}
