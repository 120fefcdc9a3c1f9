use serde::Deserialize;
use std::time::Duration;

use crate::array::DEFAULT_MAX_DATA_DISKS;
use crate::array::probe::DEFAULT_HOST_ROOT;
use crate::snapshot::{
    DEFAULT_EXCLUDED_INTERFACE_PREFIXES, DEFAULT_MAX_PENDING_COLLECTIONS, SnapshotConfig,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub snapshot: SnapshotSettings,
    pub array: ArrayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8085,
            host: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where the host filesystem is bind-mounted when running in a container.
    /// Probed before the native root.
    pub host_root: String,
    /// Dashboard assets: `index.html` and a `static/` directory.
    pub static_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            host_root: DEFAULT_HOST_ROOT.into(),
            static_dir: "web".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    pub cpu_sample_ms: u64,
    pub timeout_secs: u64,
    pub excluded_interface_prefixes: Vec<String>,
    /// Cap on sampler threads still running, including timed-out ones.
    pub max_pending_collections: usize,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            cpu_sample_ms: 1000,
            timeout_secs: 10,
            excluded_interface_prefixes: DEFAULT_EXCLUDED_INTERFACE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_pending_collections: DEFAULT_MAX_PENDING_COLLECTIONS,
        }
    }
}

impl SnapshotSettings {
    pub fn to_snapshot_config(&self) -> SnapshotConfig {
        SnapshotConfig {
            cpu_sample: Duration::from_millis(self.cpu_sample_ms),
            timeout: Duration::from_secs(self.timeout_secs),
            excluded_interface_prefixes: self.excluded_interface_prefixes.clone(),
            max_pending: self.max_pending_collections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Highest numbered `mnt/diskN` checked by the fixed mount table.
    pub max_data_disks: u32,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            max_data_disks: DEFAULT_MAX_DATA_DISKS,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.paths.host_root.is_empty(),
            "paths.host_root must be non-empty"
        );
        anyhow::ensure!(
            !self.paths.static_dir.is_empty(),
            "paths.static_dir must be non-empty"
        );
        anyhow::ensure!(
            self.snapshot.cpu_sample_ms > 0,
            "snapshot.cpu_sample_ms must be > 0, got {}",
            self.snapshot.cpu_sample_ms
        );
        anyhow::ensure!(
            self.snapshot.timeout_secs > 0,
            "snapshot.timeout_secs must be > 0, got {}",
            self.snapshot.timeout_secs
        );
        anyhow::ensure!(
            self.snapshot.timeout_secs.saturating_mul(1000) > self.snapshot.cpu_sample_ms,
            "snapshot.timeout_secs ({}s) must exceed snapshot.cpu_sample_ms ({}ms)",
            self.snapshot.timeout_secs,
            self.snapshot.cpu_sample_ms
        );
        anyhow::ensure!(
            self.snapshot.max_pending_collections > 0,
            "snapshot.max_pending_collections must be > 0"
        );
        anyhow::ensure!(
            self.array.max_data_disks > 0,
            "array.max_data_disks must be > 0, got {}",
            self.array.max_data_disks
        );
        Ok(())
    }
}
