//! Core traits for mincopy operations
//!
//! The sync core never touches `std::fs` or `tokio::fs` directly. All disk
//! access goes through [`FileSystem`] so tests can count or forbid it.

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

/// Port for the filesystem operations the sync engine needs
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a whole file
    async fn read(&self, path: &Path) -> Result<Bytes>;

    /// Create or fully overwrite a file
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Check whether a path currently exists
    async fn exists(&self, path: &Path) -> Result<bool>;

    /// Create a directory and all missing ancestors; succeeds if it exists
    async fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove exactly one file
    async fn remove_file(&self, path: &Path) -> Result<()>;
}
