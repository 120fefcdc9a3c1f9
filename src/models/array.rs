// Storage array and per-disk models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a disk inside the array; serializes lowercase (e.g. "parity").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskRole {
    Parity,
    Data,
    Cache,
    Pool,
    User,
}

impl DiskRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiskRole::Parity => "parity",
            DiskRole::Data => "data",
            DiskRole::Cache => "cache",
            DiskRole::Pool => "pool",
            DiskRole::User => "user",
        }
    }
}

impl fmt::Display for DiskRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub path: String,
    pub name: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
    #[serde(rename = "type")]
    pub role: DiskRole,
}

/// Array run state. `Reported` carries a literal `mdState` value the classifier
/// could not map (e.g. "RECON_DISK").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArrayState {
    Started,
    Stopped,
    #[default]
    Unknown,
    Reported(String),
}

impl From<String> for ArrayState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Started" => ArrayState::Started,
            "Stopped" => ArrayState::Stopped,
            "Unknown" => ArrayState::Unknown,
            _ => ArrayState::Reported(s),
        }
    }
}

impl From<ArrayState> for String {
    fn from(state: ArrayState) -> Self {
        match state {
            ArrayState::Reported(s) => s,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ArrayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayState::Started => f.write_str("Started"),
            ArrayState::Stopped => f.write_str("Stopped"),
            ArrayState::Unknown => f.write_str("Unknown"),
            ArrayState::Reported(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Protection {
    Protected,
    #[serde(rename = "Not Protected")]
    NotProtected,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayStatus {
    pub state: ArrayState,
    pub protection: Protection,
    pub total_capacity: u64,
    pub used_space: u64,
    pub cache_size: u64,
    pub parity_size: u64,
}

impl ArrayStatus {
    /// Builds a status whose totals are folded from `disks`: data disks count
    /// towards capacity/used, cache and parity disks towards their own sizes.
    pub fn from_disks(state: ArrayState, protection: Protection, disks: &[DiskInfo]) -> Self {
        let mut status = ArrayStatus {
            state,
            protection,
            ..Default::default()
        };
        for disk in disks {
            match disk.role {
                DiskRole::Data => {
                    status.total_capacity = status.total_capacity.saturating_add(disk.total);
                    status.used_space = status.used_space.saturating_add(disk.used);
                }
                DiskRole::Cache => {
                    status.cache_size = status.cache_size.saturating_add(disk.total);
                }
                DiskRole::Parity => {
                    status.parity_size = status.parity_size.saturating_add(disk.total);
                }
                DiskRole::Pool | DiskRole::User => {}
            }
        }
        status
    }
}
