// Disk enumeration strategies.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::models::{DiskInfo, DiskRole};

use super::ini::IniDocument;
use super::probe::PathProber;
use super::roles::{self, MatchRule};
use super::usage::{DiskUsage, UsageProbe};

const COMPONENT: &str = "disk_enumerator";

/// Device link directory scanned by [`DiskSource::ByIdScan`].
pub const BY_ID_DIR: &str = "dev/disk/by-id";

/// Disk configuration files, most authoritative first.
pub const DISKS_INI_CANDIDATES: &[&str] =
    &["var/local/emhttp/disks.ini", "boot/config/disks.ini"];

/// Device link prefixes that denote a physical disk.
const BUS_PREFIXES: &[&str] = &["ata-", "scsi-"];

/// Configuration sections that always describe parity disks.
const PARITY_SECTIONS: &[&str] = &["parity", "parity2"];

/// One row of the conventional mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub name: String,
    pub relative: String,
    pub role: DiskRole,
}

/// Numbered data disks, then the cache mount, then the user share.
pub fn mount_table(max_data_disks: u32) -> Vec<MountPoint> {
    let mut table: Vec<MountPoint> = (1..=max_data_disks)
        .map(|n| MountPoint {
            name: format!("disk{}", n),
            relative: format!("mnt/disk{}", n),
            role: DiskRole::Data,
        })
        .collect();
    table.push(MountPoint {
        name: "cache".into(),
        relative: "mnt/cache".into(),
        role: DiskRole::Cache,
    });
    table.push(MountPoint {
        name: "user".into(),
        relative: "mnt/user".into(),
        role: DiskRole::User,
    });
    table
}

/// Where the disk list comes from. Variants are discovered by probing and
/// tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskSource {
    /// Device links under a by-id directory.
    ByIdScan { dir: PathBuf },
    /// Mount points from the conventional table that exist right now.
    FixedMountTable { mounts: Vec<(MountPoint, PathBuf)> },
    /// A disks.ini configuration file.
    IniConfig { file: PathBuf },
}

impl DiskSource {
    /// Probes for every source that is present, in priority order.
    pub fn discover(prober: &PathProber, max_data_disks: u32) -> Vec<DiskSource> {
        let mut sources = Vec::with_capacity(3);
        if let Some(dir) = prober.probe(BY_ID_DIR) {
            sources.push(DiskSource::ByIdScan { dir });
        }
        let mounts: Vec<(MountPoint, PathBuf)> = mount_table(max_data_disks)
            .into_iter()
            .filter_map(|m| prober.probe(&m.relative).map(|p| (m, p)))
            .collect();
        if !mounts.is_empty() {
            sources.push(DiskSource::FixedMountTable { mounts });
        }
        if let Some(file) = prober.probe_any(DISKS_INI_CANDIDATES) {
            sources.push(DiskSource::IniConfig { file });
        }
        sources
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DiskSource::ByIdScan { .. } => "by_id_scan",
            DiskSource::FixedMountTable { .. } => "fixed_mount_table",
            DiskSource::IniConfig { .. } => "ini_config",
        }
    }

    /// Disks whose usage cannot be read are skipped and reported to `diag`.
    pub fn enumerate(&self, usage: &dyn UsageProbe, diag: &dyn Diagnostics) -> Vec<DiskInfo> {
        match self {
            DiskSource::ByIdScan { dir } => scan_by_id(dir, usage, diag),
            DiskSource::FixedMountTable { mounts } => mounts
                .iter()
                .filter_map(|(m, path)| read_disk(path, &m.name, m.role, usage, diag))
                .collect(),
            DiskSource::IniConfig { file } => read_disks_ini(file, usage, diag),
        }
    }
}

fn read_disk(
    path: &Path,
    name: &str,
    role: DiskRole,
    usage: &dyn UsageProbe,
    diag: &dyn Diagnostics,
) -> Option<DiskInfo> {
    match usage.usage(path) {
        Ok(u) => Some(disk_info(path, name, role, u)),
        Err(e) => {
            diag.warn(COMPONENT, format!("skipping disk {}: {}", name, e));
            None
        }
    }
}

fn disk_info(path: &Path, name: &str, role: DiskRole, u: DiskUsage) -> DiskInfo {
    DiskInfo {
        path: path.to_string_lossy().into_owned(),
        name: name.to_string(),
        total: u.total,
        used: u.used,
        free: u.free,
        used_percent: u.used_percent,
        role,
    }
}

fn scan_by_id(dir: &Path, usage: &dyn UsageProbe, diag: &dyn Diagnostics) -> Vec<DiskInfo> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            diag.warn(COMPONENT, format!("cannot list {}: {}", dir.display(), e));
            return Vec::new();
        }
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| BUS_PREFIXES.iter().any(|p| name.starts_with(p)))
        .collect();
    names.sort();

    names
        .iter()
        .filter_map(|name| {
            let real = match std::fs::canonicalize(dir.join(name)) {
                Ok(p) => p,
                Err(e) => {
                    diag.warn(COMPONENT, format!("cannot resolve {}: {}", name, e));
                    return None;
                }
            };
            let role = roles::classify(name, MatchRule::Substring);
            read_disk(&real, name, role, usage, diag)
        })
        .collect()
}

fn read_disks_ini(file: &Path, usage: &dyn UsageProbe, diag: &dyn Diagnostics) -> Vec<DiskInfo> {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            diag.warn(COMPONENT, format!("cannot read {}: {}", file.display(), e));
            return Vec::new();
        }
    };
    let doc = IniDocument::parse(&text);
    if doc.is_empty() {
        diag.warn(COMPONENT, format!("{} has no sections", file.display()));
    }

    doc.sections()
        .filter_map(|section| {
            let Some(device) = section.get("device").filter(|d| !d.is_empty()) else {
                diag.warn(COMPONENT, format!("section {} has no device", section.name));
                return None;
            };
            let role = if PARITY_SECTIONS.contains(&section.name.as_str()) {
                DiskRole::Parity
            } else {
                roles::classify(&section.name, MatchRule::Prefix)
            };
            read_disk(&device_path(device), &section.name, role, usage, diag)
        })
        .collect()
}

/// Bare kernel names (e.g. `sdb`) live under `/dev`.
fn device_path(device: &str) -> PathBuf {
    let path = Path::new(device);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new("/dev").join(path)
    }
}
