// Memory and root snapshot models

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ArrayStatus, DiskInfo, NetworkStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
    pub swap_total: u64,
    pub swap_used: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub hostname: String,
    pub cpu_usage: Vec<f64>,
    pub cpu_temp: f64,
    pub cpu_cores: usize,
    pub load_average: Vec<f64>,
    pub memory_stats: MemoryStats,
    pub network_stats: NetworkStats,
    pub array_status: ArrayStatus,
    pub disk_stats: Vec<DiskInfo>,
    /// Serialized as whole nanoseconds.
    #[serde(with = "duration_nanos")]
    pub uptime: Duration,
    pub platform: String,
}

mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_nanos)
    }
}
