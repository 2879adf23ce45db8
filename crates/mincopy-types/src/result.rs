//! Result type alias for mincopy operations

use crate::Error;

/// Result type alias for mincopy operations
pub type Result<T> = std::result::Result<T, Error>;
