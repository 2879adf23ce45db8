//! Core type system and error handling for mincopy
//!
//! This crate provides the foundational types shared by the mincopy crates:
//!
//! - **Error handling**: a single error taxonomy where every I/O failure names its path
//! - **Configuration**: the immutable [`SyncConfig`] and relative path resolution
//! - **Events and outcomes**: [`WatchEvent`], [`EventKind`], [`SyncOutcome`]
//! - **Activity counters**: [`ActivityCounters`] shared between engine and reporter
//! - **Traits**: the async [`FileSystem`] port (with the `async` feature)
//!
//! # Features
//!
//! - `async`: Enable the async `FileSystem` trait
//!
//! # Examples
//!
//! ```rust
//! use mincopy_types::{ActivityCounters, SyncConfig};
//! use std::path::Path;
//!
//! let config = SyncConfig::new("/src", "/dst");
//! let dest = config.dest_path(Path::new("a/b.txt")).unwrap();
//! assert!(dest.ends_with("a/b.txt"));
//!
//! let counters = ActivityCounters::new();
//! counters.record_write();
//! assert_eq!(counters.take().writes, 1);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod result;
#[cfg(feature = "async")]
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{SyncConfig, DEFAULT_INCLUDE};
pub use error::{Error, ErrorKind, ErrorSeverity};
pub use result::Result;
#[cfg(feature = "async")]
pub use traits::FileSystem;
pub use types::*;
