//! Read-only view of a single commit.
//!
//! A `CommitView` pins one commit at construction and answers `readdir`,
//! `getattr` and `access` (plus `read` and `readlink`) for paths inside that
//! commit's tree. Moving the branch or tag the commit was named by has no
//! effect on a view that already exists.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::storage::{Commit, Entry, ObjectKind, Repository};
use crate::utils::path::{is_root, join, split_head_tail, split_path_into_components};
use crate::views::attr::FileAttr;
use crate::views::config::MountConfig;
use crate::views::context::CallContext;
use crate::views::error::{FsError, FsResult};

/// Outcome of `getattr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Getattr {
    /// no path was given, so there is nothing to resolve at this layer
    NoTarget,
    /// the path does not exist in the snapshot
    NotFound(String),
    Found(FileAttr),
}

impl Getattr {
    /// The shape the dispatcher replies with: nothing, a record, or ENOENT.
    pub fn into_reply(self) -> FsResult<Option<FileAttr>> {
        match self {
            Getattr::NoTarget => Ok(None),
            Getattr::NotFound(path) => Err(FsError::not_found(path)),
            Getattr::Found(attr) => Ok(Some(attr)),
        }
    }
}

/// A mounted commit.
pub struct CommitView {
    repo: Arc<dyn Repository>,
    commit_sha1: String,
    commit: Commit,
    config: MountConfig,
}

impl CommitView {
    /// Resolve `commit_sha1` and mount it.
    ///
    /// This is the only time the view asks the repository for its commit.
    pub fn new(
        repo: Arc<dyn Repository>,
        commit_sha1: impl Into<String>,
        config: MountConfig,
    ) -> FsResult<Self> {
        let commit_sha1 = commit_sha1.into();
        let commit = repo.resolve_revision(&commit_sha1)?;

        debug!(
            revision = %commit_sha1,
            commit = %commit.id,
            uid = config.uid,
            gid = config.gid,
            "mounted commit view"
        );

        Ok(Self {
            repo,
            commit_sha1,
            commit,
            config,
        })
    }

    /// The revision this view was created from.
    pub fn commit_sha1(&self) -> &str {
        &self.commit_sha1
    }

    /// The commit this view serves.
    pub fn commit(&self) -> &Commit {
        &self.commit
    }

    pub fn mount_time(&self) -> DateTime<Utc> {
        self.config.mount_time
    }

    /// List a directory: `.`, `..`, then the entries in repository order.
    pub fn readdir(&self, path: &str, _fh: u64) -> FsResult<Vec<String>> {
        trace!(path, "readdir");

        let (_, name) = split_head_tail(path);
        let children: Vec<String> = if name.is_empty() {
            self.commit.tree.names().map(str::to_string).collect()
        } else {
            self.repo
                .resolve_entries(&self.commit.tree, path)?
                .into_iter()
                .map(|entry| entry.name)
                .collect()
        };

        let mut names = Vec::with_capacity(children.len() + 2);
        names.push(".".to_string());
        names.push("..".to_string());
        names.extend(children);
        Ok(names)
    }

    /// Attributes of `path`.
    ///
    /// Every entry is owned by the configured uid/gid and carries the commit
    /// time as both mtime and ctime.
    pub fn getattr(&self, path: Option<&str>, _fh: Option<u64>) -> FsResult<Getattr> {
        let path = match path {
            Some(path) if !path.is_empty() => path,
            _ => return Ok(Getattr::NoTarget),
        };
        trace!(path, "getattr");

        let (uid, gid, time) = (self.config.uid, self.config.gid, self.commit.commit_time);

        if is_root(path) {
            return Ok(Getattr::Found(FileAttr::directory(uid, gid, time)));
        }

        let kind = match self.repo.classify(&self.commit.tree, path)? {
            Some(kind) => kind,
            None => {
                debug!(path, commit = %self.commit.id, "getattr on missing path");
                return Ok(Getattr::NotFound(path.to_string()));
            }
        };

        let size = if kind.is_blob() {
            self.repo.blob_size(&self.commit.tree, path)?
        } else {
            0
        };

        Ok(Getattr::Found(FileAttr::for_kind(kind, uid, gid, time, size)))
    }

    /// Check that the path in `ctx` exists in the snapshot.
    ///
    /// Only existence is checked: `mode` is not looked at, and a call with no
    /// relative path, or one naming the mount root, always succeeds.
    pub fn access(&self, ctx: &CallContext, path: &str, mode: i32) -> FsResult<()> {
        trace!(path, mode, relative_path = ?ctx.relative_path, "access");

        let Some(relative) = ctx.below_root() else {
            return Ok(());
        };

        let components = split_path_into_components(relative);
        if !self.validate_commit_path(&components)? {
            debug!(path = relative, commit = %self.commit.id, "access on missing path");
            return Err(FsError::not_found(relative));
        }

        Ok(())
    }

    /// Read up to `size` bytes of a file starting at `offset`.
    pub fn read(&self, path: &str, size: usize, offset: u64, _fh: u64) -> FsResult<Vec<u8>> {
        trace!(path, size, offset, "read");
        self.ensure_exists(path)?;

        let data = self.repo.read_blob(&self.commit.tree, path)?;
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(data.len());
        let end = start.saturating_add(size).min(data.len());
        Ok(data[start..end].to_vec())
    }

    /// The target of a symbolic link.
    pub fn readlink(&self, path: &str) -> FsResult<Vec<u8>> {
        trace!(path, "readlink");
        self.ensure_exists(path)?;
        Ok(self.repo.read_blob(&self.commit.tree, path)?)
    }

    fn ensure_exists(&self, path: &str) -> FsResult<ObjectKind> {
        self.repo
            .classify(&self.commit.tree, path)?
            .ok_or_else(|| FsError::not_found(path))
    }

    /// Walk `components` down from the root tree.
    ///
    /// Every component but the last must be a directory; the last may be
    /// anything.
    fn validate_commit_path(&self, components: &[&str]) -> FsResult<bool> {
        let mut entries: Cow<'_, [Entry]> = Cow::Borrowed(&self.commit.tree.entries);
        let mut walked = String::new();

        for (depth, name) in components.iter().enumerate() {
            let Some(entry) = entries.iter().find(|entry| entry.name == *name) else {
                return Ok(false);
            };

            if depth + 1 == components.len() {
                return Ok(true);
            }

            if entry.kind != ObjectKind::Tree {
                return Ok(false);
            }

            walked = join(&walked, name);
            entries = Cow::Owned(self.repo.resolve_entries(&self.commit.tree, &walked)?);
        }

        Ok(true)
    }
}

impl std::fmt::Debug for CommitView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitView")
            .field("commit_sha1", &self.commit_sha1)
            .field("commit", &self.commit.id)
            .field("config", &self.config)
            .finish()
    }
}
