// Disk role classification by name.
//
// All name-based role rules live here so enumeration code never matches on
// names itself.

use crate::models::DiskRole;

/// How a name is matched against role keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Keyword anywhere in the name (by-id device links).
    Substring,
    /// Keyword at the start of the name (configuration section names).
    Prefix,
}

pub fn classify(name: &str, rule: MatchRule) -> DiskRole {
    match rule {
        MatchRule::Substring => {
            if name.contains("parity") {
                DiskRole::Parity
            } else if name.contains("cache") {
                DiskRole::Cache
            } else {
                DiskRole::Data
            }
        }
        MatchRule::Prefix => {
            if name.starts_with("cache") {
                DiskRole::Cache
            } else if name.starts_with("pool") {
                DiskRole::Pool
            } else {
                DiskRole::Data
            }
        }
    }
}
