//! Local filesystem backed by `tokio::fs`

use async_trait::async_trait;
use bytes::Bytes;
use mincopy_types::{Error, FileSystem, Result};
use std::path::Path;
use tokio::fs;

/// [`FileSystem`] implementation over the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// Create a new local filesystem handle
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read(&self, path: &Path) -> Result<Bytes> {
        fs::read(path)
            .await
            .map(Bytes::from)
            .map_err(|e| Error::io_at("read", path, e))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| Error::io_at("write", path, e))
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        fs::try_exists(path)
            .await
            .map_err(|e| Error::io_at("check existence of", path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| Error::io_at("create directory", path, e))
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| Error::io_at("delete", path, e))
    }
}
