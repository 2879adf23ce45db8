//! mincopy integration testing support
//!
//! The tests themselves live in `tests/`; this crate only carries the
//! helpers they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Shared helpers for building source/destination trees on disk
pub mod test_utils;
