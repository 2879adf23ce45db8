//! Main synchronization engine
//!
//! Given a path relative to both roots, the engine performs the smallest
//! mutation that makes the destination match the source: a full write when
//! the bytes differ or the destination is missing, a delete when the source
//! went away, and nothing otherwise.

use crate::{
    cache::CacheLimits,
    fs::LocalFileSystem,
    reader::DestinationReader,
};
use bytes::Bytes;
use mincopy_types::{ActivityCounters, FileSystem, Result, SyncConfig, SyncOutcome};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Write-minimizing synchronization engine
#[derive(Debug)]
pub struct SyncEngine<F = LocalFileSystem> {
    config: Arc<SyncConfig>,
    fs: Arc<F>,
    reader: DestinationReader<F>,
    counters: ActivityCounters,
}

impl SyncEngine<LocalFileSystem> {
    /// Create an engine over the local disk with default cache limits
    pub fn new(config: Arc<SyncConfig>) -> Self {
        Self::with_file_system(config, Arc::new(LocalFileSystem::new()), CacheLimits::default())
    }
}

impl<F: FileSystem> SyncEngine<F> {
    /// Create an engine over an arbitrary filesystem
    pub fn with_file_system(config: Arc<SyncConfig>, fs: Arc<F>, limits: CacheLimits) -> Self {
        let reader = DestinationReader::new(Arc::clone(&fs), limits);
        Self {
            config,
            fs,
            reader,
            counters: ActivityCounters::new(),
        }
    }

    /// Use `counters` instead of a private set
    pub fn with_counters(mut self, counters: ActivityCounters) -> Self {
        self.counters = counters;
        self
    }

    /// Handle to the write/delete counters
    pub fn counters(&self) -> ActivityCounters {
        self.counters.clone()
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The cache-backed destination reader
    pub fn reader(&mut self) -> &mut DestinationReader<F> {
        &mut self.reader
    }

    /// Make the destination copy of `file` match the source, writing only on difference
    pub async fn upsert(&mut self, file: &Path) -> Result<SyncOutcome> {
        let src_file = self.config.source_path(file)?;
        let dest_file = self.config.dest_path(file)?;

        let content = self.fs.read(&src_file).await?;

        if !self.needs_write(&dest_file, &content).await? {
            debug!("Unchanged: {}", file.display());
            return Ok(SyncOutcome::Unchanged);
        }

        if let Some(parent) = dest_file.parent() {
            self.fs.create_dir_all(parent).await?;
        }
        if let Err(e) = self.fs.write(&dest_file, &content).await {
            // The file may have been truncated before the write failed
            self.reader.forget(&dest_file);
            return Err(e);
        }

        self.reader.record(&dest_file, content);
        self.counters.record_write();
        if self.config.debug {
            info!("wrote {}", file.display());
        } else {
            debug!("wrote {}", file.display());
        }

        Ok(SyncOutcome::Written)
    }

    /// Delete the destination copy of `file` if there is one
    pub async fn remove(&mut self, file: &Path) -> Result<SyncOutcome> {
        let dest_file = self.config.dest_path(file)?;

        if !self.fs.exists(&dest_file).await? {
            debug!("Already absent: {}", file.display());
            return Ok(SyncOutcome::AlreadyAbsent);
        }

        self.fs.remove_file(&dest_file).await?;

        self.reader.forget(&dest_file);
        self.counters.record_delete();
        if self.config.debug {
            info!("unlinked {}", file.display());
        } else {
            debug!("unlinked {}", file.display());
        }

        Ok(SyncOutcome::Deleted)
    }

    /// A write is needed when the destination is missing or its bytes differ
    async fn needs_write(&mut self, dest_file: &Path, content: &Bytes) -> Result<bool> {
        if !self.fs.exists(dest_file).await? {
            return Ok(true);
        }

        let existing = self.reader.read(dest_file).await?;
        Ok(existing != *content)
    }
}
