//!   Repository access for snapshot views.
//!
//!  The `Repository` trait is everything a view needs from the object store.
//!  `GitRepository` implements it over `git2::Repository` with thread-safe
//!  access, so one handle can back any number of mounted views.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::storage::commit::{self, Commit};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::tree::TreeHandle;
use crate::storage::types::{Entry, ObjectKind, Tree};

/// Read access to commits and trees.
///
/// Paths are absolute snapshot paths (`/docs/guide`) relative to `tree`;
/// `/` is `tree` itself. Implementations must never mutate the object graph.
pub trait Repository: Send + Sync {
    /// Resolve a revision specifier to a commit.
    fn resolve_revision(&self, spec: &str) -> StorageResult<Commit>;

    /// The entries of the directory at `path`.
    ///
    /// Fails if any component is missing or the path is not a directory.
    fn resolve_entries(&self, tree: &Tree, path: &str) -> StorageResult<Vec<Entry>>;

    /// What lives at `path`, or `None` if nothing does.
    fn classify(&self, tree: &Tree, path: &str) -> StorageResult<Option<ObjectKind>>;

    /// Size in bytes of the blob at `path`.
    fn blob_size(&self, tree: &Tree, path: &str) -> StorageResult<u64>;

    /// Contents of the blob at `path`.
    fn read_blob(&self, tree: &Tree, path: &str) -> StorageResult<Vec<u8>>;
}

/// The Git-backed repository.
///
/// Clone this to share across threads - it uses Arc internally.
#[derive(Clone)]
pub struct GitRepository {
    inner: Arc<GitRepositoryInner>,
}

struct GitRepositoryInner {
    // git2::Repository is Send but not Sync
    repo: Mutex<git2::Repository>,
    path: PathBuf,
}

impl GitRepository {
    fn from_git2(repo: git2::Repository, path: &Path) -> Self {
        Self {
            inner: Arc::new(GitRepositoryInner {
                repo: Mutex::new(repo),
                path: path.to_path_buf(),
            }),
        }
    }

    /// Open an existing repository.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::open(path)
            .map_err(|_| StorageError::NotInitialized(path.to_path_buf()))?;

        debug!(path = %path.display(), "opened repository");
        Ok(Self::from_git2(repo, path))
    }

    /// Find the repository containing `path`, walking up parent directories.
    pub fn discover(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::discover(path)
            .map_err(|_| StorageError::NotInitialized(path.to_path_buf()))?;

        let root = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        debug!(path = %root.display(), "discovered repository");
        Ok(Self::from_git2(repo, &root))
    }

    /// Initialize a new, empty repository.
    pub fn init(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::init(path)?;
        Ok(Self::from_git2(repo, path))
    }

    /// Get the repository path.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Execute a function with access to the repository.
    pub fn with_repo<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&git2::Repository) -> StorageResult<T>,
    {
        let repo = self.inner.repo.lock();
        f(&repo)
    }

    /// Execute a function against `tree`, looked up fresh in the object store.
    fn with_tree<F, T>(&self, tree: &Tree, f: F) -> StorageResult<T>
    where
        F: for<'r> FnOnce(&'r git2::Repository, &TreeHandle<'r>) -> StorageResult<T>,
    {
        self.with_repo(|repo| {
            let handle = TreeHandle::find(repo, tree.id)?;
            f(repo, &handle)
        })
    }
}

impl Repository for GitRepository {
    fn resolve_revision(&self, spec: &str) -> StorageResult<Commit> {
        let commit = self.with_repo(|repo| commit::resolve_revision(repo, spec))?;
        debug!(spec, commit = %commit.id, "resolved revision");
        Ok(commit)
    }

    fn resolve_entries(&self, tree: &Tree, path: &str) -> StorageResult<Vec<Entry>> {
        trace!(tree = %tree.id, path, "resolving entries");
        self.with_tree(tree, |repo, root| {
            // submodule contents live in another repository
            if root.classify(path)? == Some(ObjectKind::Commit) {
                return Ok(Vec::new());
            }
            Ok(root.subtree(repo, path)?.load().entries)
        })
    }

    fn classify(&self, tree: &Tree, path: &str) -> StorageResult<Option<ObjectKind>> {
        trace!(tree = %tree.id, path, "classifying");
        self.with_tree(tree, |_, root| root.classify(path))
    }

    fn blob_size(&self, tree: &Tree, path: &str) -> StorageResult<u64> {
        self.with_tree(tree, |repo, root| Ok(root.blob(repo, path)?.size() as u64))
    }

    fn read_blob(&self, tree: &Tree, path: &str) -> StorageResult<Vec<u8>> {
        self.with_tree(tree, |repo, root| Ok(root.blob(repo, path)?.content().to_vec()))
    }
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.inner.path)
            .finish()
    }
}
