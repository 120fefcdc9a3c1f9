// Array/disk state resolution: probe sources, classify state, enumerate
// disks, fold totals.

pub mod ini;
pub mod probe;
pub mod roles;
pub mod sources;
pub mod state;
pub mod usage;

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::models::{ArrayStatus, DiskInfo};

use probe::PathProber;
use sources::DiskSource;
use state::ArrayVerdict;
use usage::UsageProbe;

const COMPONENT: &str = "array_resolver";

/// Kernel state files, in the order they are tried.
pub const STATE_CANDIDATES: &[&str] = &["proc/mdcmd", "proc/mdstat"];

/// Default size of the numbered part of the mount table.
pub const DEFAULT_MAX_DATA_DISKS: u32 = 28;

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayReport {
    pub status: ArrayStatus,
    pub disks: Vec<DiskInfo>,
    /// Kind of the disk source that produced `disks`, if any did.
    pub disk_source: Option<&'static str>,
}

pub struct ArrayResolver {
    prober: PathProber,
    usage: Arc<dyn UsageProbe>,
    max_data_disks: u32,
}

impl ArrayResolver {
    pub fn new(prober: PathProber, usage: Arc<dyn UsageProbe>, max_data_disks: u32) -> Self {
        Self {
            prober,
            usage,
            max_data_disks,
        }
    }

    /// Never fails: unreadable or missing sources degrade to defaults and
    /// are reported to `diag`.
    pub fn resolve(&self, diag: &dyn Diagnostics) -> ArrayReport {
        let verdict = self.read_state(diag);
        let (disks, disk_source) = self.enumerate_disks(diag);
        let verdict =
            verdict.unwrap_or_else(|| ArrayVerdict::inferred_from_disks(!disks.is_empty()));
        let status = ArrayStatus::from_disks(verdict.state, verdict.protection, &disks);
        tracing::debug!(
            state = %status.state,
            disks = disks.len(),
            source = disk_source.unwrap_or("none"),
            "Array resolved"
        );
        ArrayReport {
            status,
            disks,
            disk_source,
        }
    }

    /// `None` when no state file exists or the one found cannot be read.
    fn read_state(&self, diag: &dyn Diagnostics) -> Option<ArrayVerdict> {
        let Some(path) = self.prober.probe_any(STATE_CANDIDATES) else {
            diag.warn(COMPONENT, "no array state source found".to_string());
            return None;
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(state::classify(&text)),
            Err(e) => {
                diag.warn(COMPONENT, format!("cannot read {}: {}", path.display(), e));
                None
            }
        }
    }

    pub fn disk_sources(&self) -> Vec<DiskSource> {
        DiskSource::discover(&self.prober, self.max_data_disks)
    }

    /// First source yielding at least one disk wins.
    fn enumerate_disks(&self, diag: &dyn Diagnostics) -> (Vec<DiskInfo>, Option<&'static str>) {
        let sources = self.disk_sources();
        if sources.is_empty() {
            diag.warn(COMPONENT, "no disk source found".to_string());
        }
        for source in &sources {
            let disks = source.enumerate(self.usage.as_ref(), diag);
            if !disks.is_empty() {
                return (disks, Some(source.kind()));
            }
            tracing::debug!(source = source.kind(), "Disk source yielded no disks");
        }
        (Vec::new(), None)
    }
}
