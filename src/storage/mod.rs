//! storage layer for commitfs
//!
//! this module is the only place that talks to git2. Views above it see
//! commits, trees and entries through the `Repository` trait and never
//! touch git objects directly.
//!
//!  # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Repository trait / GitRepository               │
//! │     (resolve revisions, list directories, classify paths)   │
//! └─────────────────────────────────────────────────────────────┘
//!                │                               │
//!                ▼                               ▼
//!         ┌─────────────┐                 ┌─────────────┐
//!         │   commit    │ ──────────────▶ │    tree     │
//!         │ (revisions) │   root tree     │ (path walk) │
//!         └─────────────┘                 └─────────────┘
//!  ```
//!
//! # Usage
//!
//! ```ignore
//! use commitfs::storage::{GitRepository, Repository};
//!
//! let repo = GitRepository::discover(".")?;
//! let commit = repo.resolve_revision("HEAD")?;
//! let docs = repo.resolve_entries(&commit.tree, "/docs")?;
//! let kind = repo.classify(&commit.tree, "/docs/intro.md")?;
//! ```

mod commit;
mod error;
mod repository;
mod tree;
mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export public API
pub use commit::Commit;
pub use error::{StorageError, StorageResult};
pub use repository::{GitRepository, Repository};
pub use tree::TreeHandle;
pub use types::{CommitId, Entry, ObjectId, ObjectKind, Tree, TreeId};
