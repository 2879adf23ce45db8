//! Error types and handling for mincopy
//!
//! Every failure the sync core can produce is scoped to a single file. The
//! variants below carry the path (or at least a message naming it) so the
//! event router can log which file and which operation failed.

use std::io;
use std::path::{Path, PathBuf};

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Low severity - a fallback value was used
    Low,
    /// Medium severity - the operation for one file was abandoned
    Medium,
    /// High severity - the process cannot start
    High,
}

/// Main error type for mincopy operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found
        path: PathBuf,
    },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path to the file with permission issues
        path: PathBuf,
    },

    /// Input that could not be parsed, such as a glob list
    #[error("Malformed input '{input}': {message}")]
    MalformedInput {
        /// The raw input that was rejected
        input: String,
        /// Why it was rejected
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Synchronization error
    #[error("Synchronization error: {message}")]
    Sync {
        /// Error message describing the synchronization issue
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Unparseable input
    MalformedInput,
    /// Configuration errors
    Config,
    /// Synchronization errors
    Sync,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::PermissionDenied { .. } => {
                ErrorKind::Io
            }
            Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::Config { .. } => ErrorKind::Config,
            Self::Sync { .. } => ErrorKind::Sync,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedInput { .. } => ErrorSeverity::Low,
            Self::Io { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::Sync { .. } => ErrorSeverity::Medium,
            Self::Config { .. } => ErrorSeverity::High,
        }
    }

    /// Check if a later event for the same file can succeed where this one failed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::Sync { .. } => true,
            Self::MalformedInput { .. } => true,
            Self::PermissionDenied { .. } | Self::Config { .. } => false,
        }
    }

    /// Wrap an I/O failure of `operation` on `path`
    pub fn io_at(operation: &str, path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                message: format!("Failed to {} '{}': {}", operation, path.display(), error),
            },
        }
    }

    /// Create a new malformed input error
    pub fn malformed<S: Into<String>, M: Into<String>>(input: S, message: M) -> Self {
        Self::MalformedInput {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new sync error
    pub fn sync<S: Into<String>>(message: S) -> Self {
        Self::Sync {
            message: message.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
