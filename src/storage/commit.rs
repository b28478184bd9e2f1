//!  Commit resolution.
//!
//!  a mounted snapshot is pinned to one commit. This module turns whatever
//!  revision the caller hands us (full sha1, abbreviated sha1, branch, tag,
//!  `HEAD~3`, ...) into a `Commit` that no longer depends on the ref it came from.

use chrono::{DateTime, TimeZone, Utc};
use git2::Repository;

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::tree::TreeHandle;
use crate::storage::types::{CommitId, Tree};

/// a resolved commit
///
/// The root tree is loaded eagerly, so listing the top of a snapshot never
/// goes back to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: CommitId,
    pub tree: Tree,
    /// committer time, seconds since the epoch
    pub commit_time: i64,
}

impl Commit {
    /// create a Commit from a git2::Commit
    pub(crate) fn from_git2(commit: &git2::Commit<'_>) -> StorageResult<Self> {
        let root = TreeHandle::new(commit.tree()?);
        Ok(Self {
            id: CommitId::new(commit.id()),
            tree: root.load(),
            commit_time: commit.time().seconds(),
        })
    }

    /// the full hex sha1
    pub fn sha1(&self) -> String {
        self.id.to_string()
    }

    /// commit time as a timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.commit_time, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// resolve a revision specifier to a commit
pub fn resolve_revision(repo: &Repository, spec: &str) -> StorageResult<Commit> {
    let object = repo
        .revparse_single(spec)
        .map_err(|_| StorageError::RevisionNotFound(spec.to_string()))?;

    let commit = object
        .peel_to_commit()
        .map_err(|_| StorageError::RevisionNotFound(spec.to_string()))?;

    Commit::from_git2(&commit)
}
