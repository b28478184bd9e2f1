//! Storage layer error types
//!
//! All errors that can occur while reading objects out of the repository are
//! defined here. We use `thiserror` for ergonomic error definition and better
//! error messages

use std::path::PathBuf;

use thiserror::Error;

/// the main error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// error from the underlying Git library
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// the revision specifier did not name a commit
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// a path component does not exist in the tree
    #[error("path not found: {0}")]
    PathNotFound(String),

    /// the path names something other than a directory
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// the path names something other than a file or symlink
    #[error("not a blob: {0}")]
    NotABlob(String),

    /// repo is not initialized
    #[error("repository not initialized: {0}")]
    NotInitialized(PathBuf),

    /// internal error that shouldn't happen
    #[error("internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// check if this error indicates the object doesn't exist
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::RevisionNotFound(_) | StorageError::PathNotFound(_) => true,
            StorageError::Git(e) => e.code() == git2::ErrorCode::NotFound,
            _ => false,
        }
    }

    /// check if a path or revision failed to resolve, as opposed to the
    /// repository itself failing
    pub fn is_unresolvable(&self) -> bool {
        match self {
            StorageError::NotADirectory(_) | StorageError::NotABlob(_) => true,
            _ => self.is_not_found(),
        }
    }
}

/// result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
