//! Filesystem views over repository history.
//!
//! A view answers filesystem calls for one mounted part of the repository.
//! The dispatcher that routes kernel requests to views lives outside this
//! crate; it builds a `CallContext` for each request and turns `FsError`
//! into an errno with `FsError::errno`.

mod attr;
mod commit;
mod config;
mod context;
mod error;

pub use attr::{FileAttr, DIRECTORY_MODE, EXECUTABLE_MODE, FILE_MODE, LINK_MODE};
pub use commit::{CommitView, Getattr};
pub use config::MountConfig;
pub use context::CallContext;
pub use error::{FsError, FsResult};
