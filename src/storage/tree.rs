//!  tree walking for snapshot browsing.
//!
//! in Git, a tree is a directory. A snapshot path like `/docs/guide/intro.txt`
//! is answered by starting at the commit's root tree and following one tree
//! entry per path component.
//!
//! this module provides safe abstractions over git2's tree lookups, which
//! report a missing path and a broken repository through the same error type.

use std::path::PathBuf;

use git2::{Blob, ErrorCode, ObjectType, Repository};
use tracing::warn;

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{Entry, ObjectId, ObjectKind, Tree, TreeId};
use crate::utils::path::split_path_into_components;

/// A read only handle to a git tree
///
/// think of it as a snapshot - it won't change even if new commits are made.
#[derive(Debug)]
pub struct TreeHandle<'repo> {
    tree: git2::Tree<'repo>,
}

impl<'repo> TreeHandle<'repo> {
    /// create a TreeHandle from a git2::Tree
    pub(crate) fn new(tree: git2::Tree<'repo>) -> Self {
        Self { tree }
    }

    /// look up a tree by id
    pub fn find(repo: &'repo Repository, id: TreeId) -> StorageResult<Self> {
        Ok(Self::new(repo.find_tree(id.raw())?))
    }

    /// get the tree ID
    pub fn id(&self) -> TreeId {
        TreeId::new(self.tree.id())
    }

    /// the entry at `path`, relative to this tree
    ///
    /// `Ok(None)` means the path does not exist, including paths that try to
    /// descend through a file.
    pub fn entry_at(&self, path: &str) -> StorageResult<Option<git2::TreeEntry<'static>>> {
        let relative = relative_path(path);
        if relative.as_os_str().is_empty() {
            return Ok(None);
        }

        match self.tree.get_path(&relative) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(StorageError::Git(e)),
        }
    }

    /// the tree at `path`, this tree itself for the root
    pub fn subtree(&self, repo: &'repo Repository, path: &str) -> StorageResult<TreeHandle<'repo>> {
        if split_path_into_components(path).is_empty() {
            return Ok(TreeHandle::new(self.tree.clone()));
        }

        let entry = self
            .entry_at(path)?
            .ok_or_else(|| StorageError::PathNotFound(path.to_string()))?;

        if entry.kind() != Some(ObjectType::Tree) {
            return Err(StorageError::NotADirectory(path.to_string()));
        }

        Ok(TreeHandle::new(repo.find_tree(entry.id())?))
    }

    /// classify the object at `path`
    pub fn classify(&self, path: &str) -> StorageResult<Option<ObjectKind>> {
        if split_path_into_components(path).is_empty() {
            return Ok(Some(ObjectKind::Tree));
        }

        Ok(self
            .entry_at(path)?
            .and_then(|entry| ObjectKind::from_filemode(entry.filemode())))
    }

    /// the blob at `path`; symlinks are blobs too
    pub fn blob(&self, repo: &'repo Repository, path: &str) -> StorageResult<Blob<'repo>> {
        if split_path_into_components(path).is_empty() {
            return Err(StorageError::NotABlob(path.to_string()));
        }

        let entry = self
            .entry_at(path)?
            .ok_or_else(|| StorageError::PathNotFound(path.to_string()))?;

        if entry.kind() != Some(ObjectType::Blob) {
            return Err(StorageError::NotABlob(path.to_string()));
        }

        Ok(repo.find_blob(entry.id())?)
    }

    /// copy the entries out, in git's order
    pub fn load(&self) -> Tree {
        let entries = self
            .tree
            .iter()
            .filter_map(|entry| {
                let name = self.entry_name(entry.name_bytes());
                match ObjectKind::from_filemode(entry.filemode()) {
                    Some(kind) => Some(Entry::new(name, kind, ObjectId::new(entry.id()))),
                    None => {
                        warn!(
                            tree = %self.tree.id(),
                            entry = %name,
                            filemode = entry.filemode(),
                            "skipping tree entry with unknown file mode"
                        );
                        None
                    }
                }
            })
            .collect();

        Tree::new(self.id(), entries)
    }

    /// entry names are bytes in git; invalid UTF-8 is replaced, and such an
    /// entry cannot be looked up again by its listed name
    fn entry_name(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(name) => name.to_string(),
            Err(_) => {
                let name = String::from_utf8_lossy(bytes).into_owned();
                warn!(
                    tree = %self.tree.id(),
                    entry = %name,
                    "tree entry name is not valid UTF-8"
                );
                name
            }
        }
    }
}

/// turn a snapshot path into the relative form git2 expects
fn relative_path(path: &str) -> PathBuf {
    split_path_into_components(path).iter().collect()
}
