// Network counter model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Byte counters summed over the physical interfaces of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub timestamp: DateTime<Utc>,
    pub interfaces: Vec<String>,
}

impl NetworkStats {
    /// Zeroed counters with no interfaces, stamped `timestamp`.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            bytes_sent: 0,
            bytes_recv: 0,
            timestamp,
            interfaces: vec![],
        }
    }
}
