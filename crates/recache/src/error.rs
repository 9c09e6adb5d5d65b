//! Error types for recache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
///
/// All variants are client-input errors. None of them indicates a corrupted
/// engine; callers report them and keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key not present in the cache
    NotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not found"),
        }
    }
}

impl std::error::Error for Error {}
