//! Snapshot path handling.
//!
//! Paths handed to a view are absolute, `/`-separated strings. Empty segments
//! are ignored everywhere, so `/a//b/` and `/a/b` name the same entry.

/// The non-empty segments of `path`, in order.
pub fn split_path_into_components(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Split `path` into its parent and its last segment.
///
/// The root splits into `("/", "")`, which is how callers recognise it.
pub fn split_head_tail(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => {
            let head = trimmed[..idx].trim_end_matches('/');
            let head = if head.is_empty() { "/" } else { head };
            (head, &trimmed[idx + 1..])
        }
        None if path.starts_with('/') => ("/", ""),
        None => ("", trimmed),
    }
}

/// Whether `path` names the root of a snapshot.
pub fn is_root(path: &str) -> bool {
    path.chars().all(|c| c == '/')
}

/// Append `name` to `parent`.
pub fn join(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    format!("{parent}/{name}")
}
