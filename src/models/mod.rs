// Snapshot models (JSON snake_case)

mod array;
mod network;
mod system;

pub use array::{ArrayState, ArrayStatus, DiskInfo, DiskRole, Protection};
pub use network::NetworkStats;
pub use system::{MemoryStats, SystemStats};
