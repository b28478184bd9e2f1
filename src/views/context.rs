//! Per-call bookkeeping.

use crate::utils::path::{is_root, split_path_into_components};

/// State that belongs to one filesystem call rather than to the view.
///
/// The dispatcher builds one of these per request, so concurrent calls on
/// the same view never see each other's paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    /// The part of the requested path below the mount point, if any.
    pub relative_path: Option<String>,
}

impl CallContext {
    /// A context with no relative path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context for an already computed relative path.
    pub fn with_relative_path(path: impl Into<String>) -> Self {
        Self {
            relative_path: Some(path.into()),
        }
    }

    /// Compute the relative path of `path` under a view mounted at `mount_prefix`.
    ///
    /// A path outside the prefix gets no relative path.
    pub fn relative_to(mount_prefix: &str, path: &str) -> Self {
        let prefix = split_path_into_components(mount_prefix);
        let components = split_path_into_components(path);

        if components.len() < prefix.len() || components[..prefix.len()] != prefix[..] {
            return Self::new();
        }

        let rest = &components[prefix.len()..];
        Self::with_relative_path(format!("/{}", rest.join("/")))
    }

    /// The relative path, unless it is missing or names the mount root.
    pub fn below_root(&self) -> Option<&str> {
        self.relative_path
            .as_deref()
            .filter(|path| !is_root(path))
    }
}
