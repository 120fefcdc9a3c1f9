// Error types for snapshot collection

use std::path::PathBuf;
use std::time::Duration;

/// Failure of a mandatory metrics-provider call; aborts the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("hostname unavailable: no identity file and the OS reported none")]
    Hostname,
    #[error("cpu sampling failed: {0}")]
    Cpu(String),
    #[error("memory stats unavailable: {0}")]
    Memory(String),
    #[error("host info unavailable: {0}")]
    HostInfo(String),
    #[error("snapshot timed out after {0:?}")]
    Timeout(Duration),
    #[error("snapshot task join: {0}")]
    Join(String),
    #[error("{0} snapshot collections still running")]
    Busy(usize),
}

/// Failure reported by the metrics provider.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("no CPUs reported")]
    NoCpus,
    #[error("total memory reported as zero")]
    NoMemory,
    #[error("operating system name unknown")]
    UnknownOs,
    #[error("{0}")]
    Other(String),
}

/// Usage query failure for a single disk; the disk is skipped.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("statvfs {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no usage recorded for {0}")]
    Missing(PathBuf),
}
