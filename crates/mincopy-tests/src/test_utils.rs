//! Temporary source and destination trees

use mincopy_types::SyncConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a `src` and a `dst` root
pub struct SyncFixture {
    /// Keeps the directory alive
    pub temp_dir: TempDir,
    /// Absolute source root
    pub source: PathBuf,
    /// Absolute destination root
    pub dest: PathBuf,
}

impl SyncFixture {
    /// Create the fixture with an empty source and no destination yet
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let source = temp_dir.path().join("src");
        let dest = temp_dir.path().join("dst");
        fs::create_dir_all(&source)?;

        Ok(Self {
            temp_dir,
            source,
            dest,
        })
    }

    /// Configuration mirroring everything from `src` to `dst`
    pub fn config(&self) -> SyncConfig {
        SyncConfig::new(&self.source, &self.dest)
    }

    /// Write a source file, creating parent directories
    pub fn write_source(&self, rel: &str, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
        write_file(&self.source.join(rel), contents.as_ref())
    }

    /// Write a destination file behind the engine's back
    pub fn write_dest(&self, rel: &str, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
        write_file(&self.dest.join(rel), contents.as_ref())
    }

    /// Delete a source file
    pub fn remove_source(&self, rel: &str) -> std::io::Result<()> {
        fs::remove_file(self.source.join(rel))
    }

    /// Destination contents, or `None` if the file does not exist
    pub fn dest_contents(&self, rel: &str) -> Option<Vec<u8>> {
        fs::read(self.dest.join(rel)).ok()
    }
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
