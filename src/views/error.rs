//! Filesystem-facing errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for view operations.
pub type FsResult<T> = Result<T, FsError>;

/// Errors a view hands back to the dispatcher.
#[derive(Debug, Error)]
pub enum FsError {
    /// the path does not resolve inside the snapshot
    #[error("no such file or directory: {path}")]
    NotFound { path: String },

    /// a repository failure, passed through untouched
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl FsError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        FsError::NotFound { path: path.into() }
    }

    /// The errno the kernel should see.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound { .. } => libc::ENOENT,
            FsError::Storage(e) if e.is_unresolvable() => libc::ENOENT,
            FsError::Storage(_) => libc::EIO,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.errno() == libc::ENOENT
    }
}
