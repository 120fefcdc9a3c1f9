// Shared test helpers: filesystem fixtures and fake capabilities.
#![allow(dead_code)]

use arraymon::array::ArrayResolver;
use arraymon::array::probe::PathProber;
use arraymon::array::usage::{DiskUsage, UsageProbe};
use arraymon::error::{MetricsError, UsageError};
use arraymon::models::MemoryStats;
use arraymon::sysinfo_repo::{HostInfo, InterfaceCounters, LoadAverage, MetricsProvider};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Writes `content` at `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

pub fn make_dir(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    std::fs::create_dir_all(&path).unwrap();
    path
}

/// Usage figures keyed by path; unknown paths fail like an unreadable device.
#[derive(Default)]
pub struct FixedUsage {
    by_path: HashMap<PathBuf, DiskUsage>,
}

impl FixedUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, total: u64, used: u64) -> Self {
        self.by_path.insert(
            path.into(),
            DiskUsage::new(total, used, total.saturating_sub(used)),
        );
        self
    }
}

impl UsageProbe for FixedUsage {
    fn usage(&self, path: &Path) -> Result<DiskUsage, UsageError> {
        self.by_path
            .get(path)
            .copied()
            .ok_or_else(|| UsageError::Missing(path.to_path_buf()))
    }
}

pub fn resolver(root: &Path, usage: FixedUsage) -> ArrayResolver {
    ArrayResolver::new(PathProber::new([root]), Arc::new(usage), 4)
}

/// Scriptable metrics provider.
#[derive(Clone)]
pub struct FakeMetrics {
    pub hostname: Option<String>,
    pub cpu: Result<Vec<f64>, String>,
    pub cpu_delay: Duration,
    pub cores: usize,
    pub memory_ok: bool,
    pub load: Option<LoadAverage>,
    pub network: Result<Vec<InterfaceCounters>, String>,
    pub host_ok: bool,
}

impl Default for FakeMetrics {
    fn default() -> Self {
        Self {
            hostname: Some("os-host".into()),
            cpu: Ok(vec![12.5, 50.0]),
            cpu_delay: Duration::ZERO,
            cores: 2,
            memory_ok: true,
            load: Some(LoadAverage {
                one: 0.5,
                five: 0.25,
                fifteen: 0.125,
            }),
            network: Ok(vec![
                counter("lo", 1_000, 1_000),
                counter("docker0", 10, 10),
                counter("br-abc", 20, 20),
                counter("veth123", 30, 30),
                counter("eth0", 4_096, 8_192),
            ]),
            host_ok: true,
        }
    }
}

pub fn counter(name: &str, sent: u64, recv: u64) -> InterfaceCounters {
    InterfaceCounters {
        name: name.into(),
        bytes_sent: sent,
        bytes_recv: recv,
    }
}

pub fn memory_stats() -> MemoryStats {
    MemoryStats {
        total: 16_000,
        available: 12_000,
        used: 4_000,
        free: 10_000,
        used_percent: 25.0,
        swap_total: 0,
        swap_used: 0,
    }
}

impl MetricsProvider for FakeMetrics {
    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn cpu_percent(&self, _window: Duration) -> Result<Vec<f64>, MetricsError> {
        if !self.cpu_delay.is_zero() {
            std::thread::sleep(self.cpu_delay);
        }
        self.cpu.clone().map_err(MetricsError::Other)
    }

    fn cpu_count(&self) -> usize {
        self.cores
    }

    fn memory(&self) -> Result<MemoryStats, MetricsError> {
        if self.memory_ok {
            Ok(memory_stats())
        } else {
            Err(MetricsError::NoMemory)
        }
    }

    fn load_average(&self) -> Option<LoadAverage> {
        self.load
    }

    fn network_counters(&self) -> Result<Vec<InterfaceCounters>, MetricsError> {
        self.network.clone().map_err(MetricsError::Other)
    }

    fn host_info(&self) -> Result<HostInfo, MetricsError> {
        if self.host_ok {
            Ok(HostInfo {
                uptime: Duration::from_secs(3_600),
                platform: "slackware".into(),
            })
        } else {
            Err(MetricsError::UnknownOs)
        }
    }
}
