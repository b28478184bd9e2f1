//! Attribute records.
//!
//! Everything in a snapshot is read-only: directories are `r-xr-xr-x`, files
//! `r--r--r--` unless git recorded them as executable.

use crate::storage::ObjectKind;

const S_IFDIR: u32 = libc::S_IFDIR as u32;
const S_IFREG: u32 = libc::S_IFREG as u32;
const S_IFLNK: u32 = libc::S_IFLNK as u32;

/// mode of every directory, including the mount root
pub const DIRECTORY_MODE: u32 = S_IFDIR | 0o555;
/// mode of a regular file
pub const FILE_MODE: u32 = S_IFREG | 0o444;
/// mode of an executable file
pub const EXECUTABLE_MODE: u32 = S_IFREG | 0o555;
/// mode of a symbolic link
pub const LINK_MODE: u32 = S_IFLNK | 0o444;

/// The `stat` fields a view reports, named the way the transport names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttr {
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_mtime: i64,
    pub st_ctime: i64,
    pub st_mode: u32,
    pub st_nlink: u32,
    /// only reported for files and links
    pub st_size: Option<u64>,
}

impl FileAttr {
    /// A read-only directory.
    ///
    /// The link count is always 2, whatever the directory contains.
    pub fn directory(uid: u32, gid: u32, time: i64) -> Self {
        Self {
            st_uid: uid,
            st_gid: gid,
            st_mtime: time,
            st_ctime: time,
            st_mode: DIRECTORY_MODE,
            st_nlink: 2,
            st_size: None,
        }
    }

    /// The attributes for an object of `kind`; `size` is ignored for directories.
    pub fn for_kind(kind: ObjectKind, uid: u32, gid: u32, time: i64, size: u64) -> Self {
        if kind.is_directory() {
            return Self::directory(uid, gid, time);
        }

        let mode = match kind {
            ObjectKind::ExecutableBlob => EXECUTABLE_MODE,
            ObjectKind::Link => LINK_MODE,
            _ => FILE_MODE,
        };

        Self {
            st_uid: uid,
            st_gid: gid,
            st_mtime: time,
            st_ctime: time,
            st_mode: mode,
            st_nlink: 1,
            st_size: Some(size),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.st_mode & libc::S_IFMT as u32 == S_IFDIR
    }

    pub fn is_symlink(&self) -> bool {
        self.st_mode & libc::S_IFMT as u32 == S_IFLNK
    }

    /// permission bits only
    pub fn permissions(&self) -> u32 {
        self.st_mode & 0o7777
    }
}
