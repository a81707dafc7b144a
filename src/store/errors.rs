//! Store error types.
//!
//! Failure is part of the signature, never a side channel:
//! - missing records come back as `None`/`false`, not as errors
//! - `InvalidId` rejects updates outside the dense id range
//! - `Io` and `Corrupt` carry the backing path for diagnostics

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the collection and document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem-level failure during read or write.
    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file exists but cannot be interpreted as a collection.
    #[error("corrupt backing file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Id outside the current dense range `[0, len)`.
    #[error("invalid id {id}: collection holds {len} record(s)")]
    InvalidId { id: u32, len: usize },
}

impl StoreError {
    /// Wraps an I/O error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Marks a backing file as unreadable or internally inconsistent.
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
