// Telemetry snapshot: metrics provider + array resolver merged into one SystemStats.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tracing::instrument;

use crate::array::ArrayResolver;
use crate::array::probe::PathProber;
use crate::array::usage::StatvfsUsage;
use crate::config::AppConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::SnapshotError;
use crate::models::{NetworkStats, SystemStats};
use crate::sysinfo_repo::{
    InterfaceCounters, MetricsProvider, SysinfoRepo, read_cpu_temp, read_identity_name,
};

const COMPONENT: &str = "snapshot";

/// Blocking collections allowed at once, timed-out ones included.
pub const DEFAULT_MAX_PENDING_COLLECTIONS: usize = 4;

/// Interface name prefixes treated as loopback/bridge/virtual.
pub const DEFAULT_EXCLUDED_INTERFACE_PREFIXES: &[&str] =
    &["lo", "docker", "br-", "veth", "virbr"];

#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub cpu_sample: Duration,
    pub timeout: Duration,
    pub excluded_interface_prefixes: Vec<String>,
    pub max_pending: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            cpu_sample: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
            excluded_interface_prefixes: DEFAULT_EXCLUDED_INTERFACE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_pending: DEFAULT_MAX_PENDING_COLLECTIONS,
        }
    }
}

pub fn is_excluded_interface(name: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| name.starts_with(p.as_str()))
}

/// Sums counters over the interfaces that are not excluded.
pub fn aggregate_network(
    counters: &[InterfaceCounters],
    excluded_prefixes: &[String],
    timestamp: chrono::DateTime<Utc>,
) -> NetworkStats {
    let mut stats = NetworkStats::empty(timestamp);
    for c in counters
        .iter()
        .filter(|c| !is_excluded_interface(&c.name, excluded_prefixes))
    {
        stats.bytes_sent = stats.bytes_sent.saturating_add(c.bytes_sent);
        stats.bytes_recv = stats.bytes_recv.saturating_add(c.bytes_recv);
        stats.interfaces.push(c.name.clone());
    }
    stats
}

pub struct SnapshotBuilder {
    metrics: Arc<dyn MetricsProvider>,
    resolver: ArrayResolver,
    prober: PathProber,
    diagnostics: Arc<dyn Diagnostics>,
    config: SnapshotConfig,
    pending: Arc<Semaphore>,
}

impl SnapshotBuilder {
    pub fn new(
        metrics: Arc<dyn MetricsProvider>,
        resolver: ArrayResolver,
        prober: PathProber,
        diagnostics: Arc<dyn Diagnostics>,
        config: SnapshotConfig,
    ) -> Self {
        let pending = Arc::new(Semaphore::new(config.max_pending));
        Self {
            metrics,
            resolver,
            prober,
            diagnostics,
            config,
            pending,
        }
    }

    /// Production wiring: sysinfo metrics, statvfs usage, tracing diagnostics.
    pub fn from_config(app: &AppConfig) -> Self {
        let prober = PathProber::with_host_root(&app.paths.host_root);
        let resolver = ArrayResolver::new(
            prober.clone(),
            Arc::new(StatvfsUsage),
            app.array.max_data_disks,
        );
        Self::new(
            Arc::new(SysinfoRepo::new()),
            resolver,
            prober,
            Arc::new(TracingDiagnostics),
            app.snapshot.to_snapshot_config(),
        )
    }

    /// Blocks for at least the CPU sampling window. Only mandatory
    /// metrics-provider failures are returned; array and other optional
    /// reads degrade and are reported to the diagnostics sink.
    #[instrument(skip(self), fields(operation = "build_snapshot"))]
    pub fn build(&self) -> Result<SystemStats, SnapshotError> {
        let hostname = read_identity_name(&self.prober)
            .or_else(|| self.metrics.hostname())
            .ok_or(SnapshotError::Hostname)?;

        let cpu_usage = self
            .metrics
            .cpu_percent(self.config.cpu_sample)
            .map_err(|e| SnapshotError::Cpu(e.to_string()))?;

        let memory_stats = self
            .metrics
            .memory()
            .map_err(|e| SnapshotError::Memory(e.to_string()))?;

        let cpu_temp = read_cpu_temp(&self.prober).unwrap_or_else(|| {
            self.diagnostics
                .warn(COMPONENT, "cpu temperature unavailable".to_string());
            0.0
        });

        let now = Utc::now();
        let network_stats = match self.metrics.network_counters() {
            Ok(counters) => {
                aggregate_network(&counters, &self.config.excluded_interface_prefixes, now)
            }
            Err(e) => {
                self.diagnostics
                    .warn(COMPONENT, format!("network counters unavailable: {}", e));
                NetworkStats::empty(now)
            }
        };

        let cpu_cores = self.metrics.cpu_count();
        let load_average = self
            .metrics
            .load_average()
            .map(|l| vec![l.one, l.five, l.fifteen])
            .unwrap_or_default();

        let array = self.resolver.resolve(self.diagnostics.as_ref());

        let host = self
            .metrics
            .host_info()
            .map_err(|e| SnapshotError::HostInfo(e.to_string()))?;

        Ok(SystemStats {
            hostname,
            cpu_usage,
            cpu_temp,
            cpu_cores,
            load_average,
            memory_stats,
            network_stats,
            array_status: array.status,
            disk_stats: array.disks,
            uptime: host.uptime,
            platform: host.platform,
        })
    }

    /// Runs [`build`](Self::build) on the blocking pool, bounded by the
    /// configured timeout.
    ///
    /// A timed-out build keeps its thread until the provider returns. Each
    /// build holds a permit for that whole time, so at most `max_pending`
    /// threads are ever tied up; past that, `collect` fails with
    /// [`SnapshotError::Busy`] instead of queueing.
    pub async fn collect(self: Arc<Self>) -> Result<SystemStats, SnapshotError> {
        let limit = self.config.timeout;
        let permit = self
            .pending
            .clone()
            .try_acquire_owned()
            .map_err(|_| SnapshotError::Busy(self.config.max_pending))?;
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            self.build()
        });
        match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined.map_err(|e| SnapshotError::Join(e.to_string()))?,
            Err(_) => Err(SnapshotError::Timeout(limit)),
        }
    }
}
