//! Mount configuration.

use chrono::{DateTime, Utc};

/// Who owns a mounted snapshot, and when it was mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    /// Owner reported for every entry.
    pub uid: u32,
    /// Group reported for every entry.
    pub gid: u32,
    /// When the snapshot was mounted.
    pub mount_time: DateTime<Utc>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            uid: current_uid(),
            gid: current_gid(),
            mount_time: Utc::now(),
        }
    }
}

impl MountConfig {
    /// Create a configuration for an explicit owner.
    pub fn new(uid: u32, gid: u32) -> Self {
        Self {
            uid,
            gid,
            ..Default::default()
        }
    }

    /// Set uid.
    pub fn uid(mut self, value: u32) -> Self {
        self.uid = value;
        self
    }

    /// Set gid.
    pub fn gid(mut self, value: u32) -> Self {
        self.gid = value;
        self
    }

    /// Set mount_time.
    pub fn mount_time(mut self, value: DateTime<Utc>) -> Self {
        self.mount_time = value;
        self
    }
}

fn current_uid() -> u32 {
    unsafe { libc::getuid() }
}

fn current_gid() -> u32 {
    unsafe { libc::getgid() }
}
