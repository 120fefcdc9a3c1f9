// Filesystem usage lookup for a single disk path.

use std::path::Path;

use crate::error::UsageError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

impl DiskUsage {
    /// `used_percent` is `used / (used + free) * 100`, or 0 for an empty filesystem.
    pub fn new(total: u64, used: u64, free: u64) -> Self {
        let denom = used.saturating_add(free);
        let used_percent = if denom > 0 {
            (used as f64 / denom as f64) * 100.0
        } else {
            0.0
        };
        Self {
            total,
            used,
            free,
            used_percent,
        }
    }
}

pub trait UsageProbe: Send + Sync {
    fn usage(&self, path: &Path) -> Result<DiskUsage, UsageError>;
}

/// `statvfs(2)` backed usage: free counts blocks available to unprivileged users.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsUsage;

impl UsageProbe for StatvfsUsage {
    fn usage(&self, path: &Path) -> Result<DiskUsage, UsageError> {
        use nix::sys::statvfs::statvfs;

        let stat = statvfs(path).map_err(|e| UsageError::Stat {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let frsize = stat.fragment_size() as u64;
        let total = (stat.blocks() as u64).saturating_mul(frsize);
        let free = (stat.blocks_available() as u64).saturating_mul(frsize);
        let used = total.saturating_sub((stat.blocks_free() as u64).saturating_mul(frsize));
        Ok(DiskUsage::new(total, used, free))
    }
}
