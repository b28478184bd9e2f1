//! commitfs - browse Git history as a read-only filesystem
//!
//! Any commit can be mounted as a snapshot: its trees become directories,
//! its blobs become files, and every entry is read-only and stamped with the
//! commit time.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use commitfs::storage::GitRepository;
//! use commitfs::views::{CommitView, MountConfig};
//!
//! let repo = GitRepository::discover(".").unwrap();
//! let view = CommitView::new(Arc::new(repo), "HEAD~1", MountConfig::default()).unwrap();
//! for name in view.readdir("/", 0).unwrap() {
//!     println!("{name}");
//! }
//! ```

pub mod storage;
pub mod utils;
pub mod views;
