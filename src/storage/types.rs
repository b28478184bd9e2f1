//! core type-safe wrappers around git primitives for the storage layer.

use std::fmt;

use git2::{FileMode, Oid};

/// This makes sure we don't accidentally pass a tree ID where a commit ID
/// is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommitId(pub(crate) Oid);

impl CommitId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    /// parse CommitId from a hex string
    pub fn from_hex(hex: &str) -> Result<Self, git2::Error> {
        Oid::from_str(hex).map(CommitId)
    }

    /// short form of the commit ID
    pub fn short(&self) -> String {
        self.0.to_string()[..7].to_string()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Git tree identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(pub(crate) Oid);

impl TreeId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }

    pub(crate) fn raw(&self) -> Oid {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the object a tree entry points at.
///
/// For submodule entries this is a commit in another repository, so it
/// cannot be looked up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) Oid);

impl ObjectId {
    pub(crate) fn new(oid: Oid) -> Self {
        Self(oid)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a tree entry holds, as told by its file mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// a nested tree (directory)
    Tree,
    /// a regular file
    Blob,
    /// a regular file with the executable bit
    ExecutableBlob,
    /// a symbolic link, the blob holds the target
    Link,
    /// a submodule, pointing at a commit elsewhere
    Commit,
}

impl ObjectKind {
    /// classify a raw git file mode
    ///
    /// Returns `None` for modes git itself refuses to read.
    pub fn from_filemode(mode: i32) -> Option<Self> {
        let kind = match mode {
            m if m == i32::from(FileMode::Tree) => ObjectKind::Tree,
            m if m == i32::from(FileMode::Blob) => ObjectKind::Blob,
            m if m == i32::from(FileMode::BlobGroupWritable) => ObjectKind::Blob,
            m if m == i32::from(FileMode::BlobExecutable) => ObjectKind::ExecutableBlob,
            m if m == i32::from(FileMode::Link) => ObjectKind::Link,
            m if m == i32::from(FileMode::Commit) => ObjectKind::Commit,
            _ => return None,
        };
        Some(kind)
    }

    /// directories and submodules are browsed as directories
    pub fn is_directory(&self) -> bool {
        matches!(self, ObjectKind::Tree | ObjectKind::Commit)
    }

    /// anything whose content lives in a blob
    pub fn is_blob(&self) -> bool {
        matches!(
            self,
            ObjectKind::Blob | ObjectKind::ExecutableBlob | ObjectKind::Link
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Tree => "tree",
            ObjectKind::Blob => "blob",
            ObjectKind::ExecutableBlob => "executable blob",
            ObjectKind::Link => "link",
            ObjectKind::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// One child of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: ObjectKind,
    pub id: ObjectId,
}

impl Entry {
    /// create a tree entry
    pub fn new(name: impl Into<String>, kind: ObjectKind, id: ObjectId) -> Self {
        Self {
            name: name.into(),
            kind,
            id,
        }
    }
}

/// A tree with its entries loaded, in the order git stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub id: TreeId,
    pub entries: Vec<Entry>,
}

impl Tree {
    /// create a tree from already loaded entries
    pub fn new(id: TreeId, entries: Vec<Entry>) -> Self {
        Self { id, entries }
    }

    /// find a direct child by name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// iterate over the entry names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}
