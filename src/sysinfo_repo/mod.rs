// Metrics provider: CPU, memory, load, network counters and host info via sysinfo.

mod linux;

pub(crate) use linux::{read_cpu_temp, read_identity_name};

use crate::error::MetricsError;
use crate::models::MemoryStats;
use std::time::Duration;
use sysinfo::{Networks, System};
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Cumulative byte counters for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub uptime: Duration,
    pub platform: String,
}

/// OS-facing metrics consumed by the snapshot builder. All calls block.
pub trait MetricsProvider: Send + Sync {
    fn hostname(&self) -> Option<String>;
    /// One usage percentage per logical core, sampled over `window`.
    fn cpu_percent(&self, window: Duration) -> Result<Vec<f64>, MetricsError>;
    fn cpu_count(&self) -> usize;
    fn memory(&self) -> Result<MemoryStats, MetricsError>;
    fn load_average(&self) -> Option<LoadAverage>;
    fn network_counters(&self) -> Result<Vec<InterfaceCounters>, MetricsError>;
    fn host_info(&self) -> Result<HostInfo, MetricsError>;
}

/// Builds a fresh `System` per call; nothing is shared between requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoRepo;

impl SysinfoRepo {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsProvider for SysinfoRepo {
    fn hostname(&self) -> Option<String> {
        System::host_name().filter(|h| !h.is_empty())
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "cpu_percent"))]
    fn cpu_percent(&self, window: Duration) -> Result<Vec<f64>, MetricsError> {
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        std::thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        sys.refresh_cpu_usage();
        let usage: Vec<f64> = sys
            .cpus()
            .iter()
            .map(|c| (c.cpu_usage() as f64).clamp(0.0, 100.0))
            .collect();
        if usage.is_empty() {
            return Err(MetricsError::NoCpus);
        }
        Ok(usage)
    }

    fn cpu_count(&self) -> usize {
        let mut sys = System::new();
        sys.refresh_cpu_list(sysinfo::CpuRefreshKind::nothing());
        sys.cpus().len()
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "memory"))]
    fn memory(&self) -> Result<MemoryStats, MetricsError> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(MetricsError::NoMemory);
        }
        let available = sys.available_memory();
        let used = total.saturating_sub(available);
        let used_percent = (used as f64 / total as f64) * 100.0;

        Ok(MemoryStats {
            total,
            available,
            used,
            free: sys.free_memory(),
            used_percent,
            swap_total: sys.total_swap(),
            swap_used: sys.used_swap(),
        })
    }

    fn load_average(&self) -> Option<LoadAverage> {
        let load = System::load_average();
        Some(LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        })
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "network_counters"))]
    fn network_counters(&self) -> Result<Vec<InterfaceCounters>, MetricsError> {
        let networks = Networks::new_with_refreshed_list();
        let mut counters: Vec<InterfaceCounters> = networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceCounters {
                name: name.clone(),
                bytes_sent: data.total_transmitted(),
                bytes_recv: data.total_received(),
            })
            .collect();
        counters.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(counters)
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "host_info"))]
    fn host_info(&self) -> Result<HostInfo, MetricsError> {
        if System::name().is_none() {
            return Err(MetricsError::UnknownOs);
        }
        Ok(HostInfo {
            uptime: Duration::from_secs(System::uptime()),
            platform: System::distribution_id(),
        })
    }
}
