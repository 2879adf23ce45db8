//! In-memory filesystem double for unit tests

use async_trait::async_trait;
use bytes::Bytes;
use mincopy_types::{Error, FileSystem, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    files: HashMap<PathBuf, Bytes>,
    dirs: HashSet<PathBuf>,
    reads: HashMap<PathBuf, u64>,
}

/// Filesystem kept in a map, counting every read and write
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    writes: AtomicU64,
    reads_forbidden: AtomicBool,
    writes_failing: AtomicBool,
}

impl MemoryFileSystem {
    /// Empty filesystem with `/src` and `/dst` already present
    pub fn new() -> Self {
        let fs = Self::default();
        {
            let mut state = fs.state.lock().unwrap();
            state.dirs.insert(PathBuf::from("/"));
            state.dirs.insert(PathBuf::from("/src"));
            state.dirs.insert(PathBuf::from("/dst"));
        }
        fs
    }

    /// Place a file, creating its directories, without counting a write
    pub fn put<P: AsRef<Path>>(&self, path: P, contents: &[u8]) {
        let path = path.as_ref();
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            state.dirs.insert(ancestor.to_path_buf());
        }
        state
            .files
            .insert(path.to_path_buf(), Bytes::copy_from_slice(contents));
    }

    /// Delete a file behind the engine's back
    pub fn delete<P: AsRef<Path>>(&self, path: P) {
        self.state.lock().unwrap().files.remove(path.as_ref());
    }

    /// Current contents of a file
    pub fn contents<P: AsRef<Path>>(&self, path: P) -> Option<Bytes> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    /// Whether a directory exists
    pub fn has_dir<P: AsRef<Path>>(&self, path: P) -> bool {
        self.state.lock().unwrap().dirs.contains(path.as_ref())
    }

    /// Number of reads of one path
    pub fn reads_of<P: AsRef<Path>>(&self, path: P) -> u64 {
        self.state
            .lock()
            .unwrap()
            .reads
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }

    /// Number of writes of any path
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make any further read fail the test
    pub fn forbid_reads(&self) {
        self.reads_forbidden.store(true, Ordering::SeqCst);
    }

    /// Allow reads again
    pub fn allow_reads(&self) {
        self.reads_forbidden.store(false, Ordering::SeqCst);
    }

    /// Make writes truncate the target and then fail, like a full disk
    pub fn fail_writes(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }
}

fn not_found(path: &Path) -> Error {
    Error::FileNotFound {
        path: path.to_path_buf(),
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn read(&self, path: &Path) -> Result<Bytes> {
        assert!(
            !self.reads_forbidden.load(Ordering::SeqCst),
            "unexpected disk read of {}",
            path.display()
        );
        let mut state = self.state.lock().unwrap();
        *state.reads.entry(path.to_path_buf()).or_insert(0) += 1;
        state.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let parent = path.parent().ok_or_else(|| not_found(path))?;
        if !state.dirs.contains(parent) {
            return Err(not_found(parent));
        }
        if self.writes_failing.load(Ordering::SeqCst) {
            state.files.insert(path.to_path_buf(), Bytes::new());
            return Err(Error::io_at(
                "write",
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"),
            ));
        }
        state
            .files
            .insert(path.to_path_buf(), Bytes::copy_from_slice(contents));
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.files.contains_key(path) || state.dirs.contains(path))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }
}
